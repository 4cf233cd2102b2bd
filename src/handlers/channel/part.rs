//! PART command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult, for_each_target};
use super::announce_promotion;
use crate::error::ChannelError;
use tinyirc_proto::{Command, Message, MessageRef, irc_eq};
use tracing::info;

/// Handler for PART command.
///
/// `PART <channel>{,<channel>} [<reason>]`
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let channels = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let reason = msg.arg(1);

        for_each_target(ctx, channels, "PART", |ctx, name, _| {
            part_channel(ctx, name, reason)
        })
    }
}

fn part_channel(ctx: &mut Context<'_>, name: &str, reason: Option<&str>) -> HandlerResult {
    let uid = ctx.uid;
    let channel = ctx
        .matrix
        .channels
        .get(name)
        .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))?;
    if !channel.is_member(uid) {
        return Err(HandlerError::channel(channel.name(), ChannelError::NotOnChannel));
    }

    let canonical = channel.name().to_string();
    let members = channel.members().to_vec();
    let part = Message::from(Command::PART(canonical.clone(), reason.map(str::to_string)))
        .with_prefix(ctx.client()?.prefix());
    ctx.out.broadcast(members, &part);

    if let Some(departure) = ctx.matrix.channels.depart(&canonical, uid) {
        if let Some(promoted) = departure.promoted {
            announce_promotion(ctx.matrix, ctx.out, &canonical, promoted);
        }
        if departure.deleted {
            info!(channel = %canonical, "Channel deleted");
        }
    }

    let client = ctx.client_mut()?;
    if client.last_channel.as_deref().is_some_and(|last| irc_eq(last, &canonical)) {
        client.last_channel = None;
    }
    Ok(())
}
