//! NAMES command handler.

use super::super::{Context, Handler, HandlerResult};
use tinyirc_proto::{MessageRef, Response};

/// Bytes of nicknames per RPL_NAMREPLY line.
const NAMES_CHUNK: usize = 400;

/// Handler for NAMES command.
///
/// `NAMES [<channel>]`. Without a channel every channel is listed.
pub struct NamesHandler;

impl Handler for NamesHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        match msg.arg(0).filter(|name| !name.is_empty()) {
            Some(name) => send_names(ctx, name),
            None => {
                let names: Vec<String> =
                    ctx.matrix.channels.iter().map(|c| c.name().to_string()).collect();
                for name in &names {
                    send_name_lines(ctx, name);
                }
                let nick = ctx.nick();
                ctx.reply(
                    Response::RPL_ENDOFNAMES,
                    vec![nick, "*".to_string(), "End of /NAMES list".to_string()],
                );
            }
        }
        Ok(())
    }
}

/// Send 353 lines for `channel` followed by 366.
///
/// An unknown channel gets only the 366.
pub(in crate::handlers) fn send_names(ctx: &mut Context<'_>, channel: &str) {
    let name = ctx
        .matrix
        .channels
        .get(channel)
        .map_or_else(|| channel.to_string(), |c| c.name().to_string());
    send_name_lines(ctx, &name);

    let nick = ctx.nick();
    ctx.reply(
        Response::RPL_ENDOFNAMES,
        vec![nick, name, "End of /NAMES list".to_string()],
    );
}

/// The operator first with `@`, then everyone else in join order.
fn send_name_lines(ctx: &mut Context<'_>, channel: &str) {
    let Some(chan) = ctx.matrix.channels.get(channel) else {
        return;
    };

    let operator = chan.operator();
    let mut entries = vec![format!("@{}", ctx.matrix.nick_of(operator))];
    entries.extend(
        chan.members()
            .iter()
            .filter(|&&m| m != operator)
            .map(|&m| ctx.matrix.nick_of(m).to_string()),
    );

    let nick = ctx.nick();
    let name = chan.name().to_string();
    for line in chunk_names(&entries) {
        ctx.reply(
            Response::RPL_NAMREPLY,
            vec![nick.clone(), "=".to_string(), name.clone(), line],
        );
    }
}

fn chunk_names(entries: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for entry in entries {
        if !current.is_empty() && current.len() + 1 + entry.len() > NAMES_CHUNK {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(entry);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
