//! PING and PONG handlers.

use super::super::{Context, Handler, HandlerResult};
use tinyirc_proto::{Command, Message, MessageRef, Prefix};

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PING <token> [server]
        let token = msg.arg(0).unwrap_or_default();
        let server = ctx.server_name().to_string();

        let pong = Message::from(Command::PONG(server.clone(), Some(token.to_string())))
            .with_prefix(Prefix::ServerName(server));
        ctx.send(pong);
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, _ctx: &mut Context<'_>, _msg: &MessageRef<'_>) -> HandlerResult {
        Ok(())
    }
}
