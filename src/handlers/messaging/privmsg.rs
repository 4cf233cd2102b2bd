//! PRIVMSG command handler.

use super::routing::{Verb, route_to_target};
use crate::handlers::{Context, Handler, HandlerError, HandlerResult, for_each_target};
use tinyirc_proto::MessageRef;

/// Handler for PRIVMSG command.
///
/// `PRIVMSG <target>{,<target>} <text>`
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let targets = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let text = msg.arg(1).ok_or(HandlerError::NeedMoreParams)?;
        if text.is_empty() {
            return Err(HandlerError::NoTextToSend);
        }

        for_each_target(ctx, targets, "PRIVMSG", |ctx, target, _| {
            route_to_target(ctx, Verb::Privmsg, target, text)
        })
    }
}
