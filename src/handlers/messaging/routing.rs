//! Core message routing logic.

use crate::handlers::{Context, HandlerError};
use crate::state::Uid;
use tinyirc_proto::{ChannelExt, Command, Message};

/// Which command is being routed. Only the verb differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Verb {
    Privmsg,
    Notice,
}

impl Verb {
    fn command(self, target: String, text: String) -> Command {
        match self {
            Verb::Privmsg => Command::PRIVMSG(target, text),
            Verb::Notice => Command::NOTICE(target, text),
        }
    }
}

/// Deliver `text` to one target.
///
/// A channel reaches every member except the sender; membership is not
/// required. A nick reaches that client if it has finished registration.
pub(super) fn route_to_target(
    ctx: &mut Context<'_>,
    verb: Verb,
    target: &str,
    text: &str,
) -> Result<(), HandlerError> {
    let sender = ctx.uid;
    let (name, recipients): (String, Vec<Uid>) = if target.is_channel_target() {
        let channel = ctx
            .matrix
            .channels
            .get(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
        let members = channel.members().iter().copied().filter(|&m| m != sender).collect();
        (channel.name().to_string(), members)
    } else {
        let uid = ctx
            .matrix
            .clients
            .find_nick(target)
            .filter(|&uid| ctx.matrix.clients.get(uid).is_some_and(|c| c.is_registered()))
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
        (ctx.matrix.nick_of(uid).to_string(), vec![uid])
    };

    let msg = Message::from(verb.command(name, text.to_string())).with_prefix(ctx.client()?.prefix());
    ctx.out.broadcast(recipients, &msg);
    Ok(())
}
