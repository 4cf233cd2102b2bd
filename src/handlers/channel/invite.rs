//! INVITE command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use crate::error::ChannelError;
use tinyirc_proto::{Command, Message, MessageRef, Response};
use tracing::debug;

/// Handler for INVITE command.
///
/// `INVITE <nick> <channel>`
pub struct InviteHandler;

impl Handler for InviteHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let name = msg.arg(1).ok_or(HandlerError::NeedMoreParams)?;
        let uid = ctx.uid;

        let channel = ctx
            .matrix
            .channels
            .get(name)
            .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))?;
        let canonical = channel.name().to_string();
        if !channel.is_member(uid) {
            return Err(HandlerError::channel(&canonical, ChannelError::NotOnChannel));
        }

        let target_uid = ctx
            .matrix
            .clients
            .find_nick(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
        let target_nick = ctx.matrix.nick_of(target_uid).to_string();
        if channel.is_member(target_uid) {
            return Err(HandlerError::channel(
                &canonical,
                ChannelError::UserOnChannel(target_nick),
            ));
        }
        if channel.modes().invite_only() && !channel.is_operator(uid) {
            return Err(HandlerError::channel(&canonical, ChannelError::ChanOpPrivsNeeded));
        }

        if let Some(channel) = ctx.matrix.channels.get_mut(&canonical) {
            channel.invite(&target_nick);
        }

        let nick = ctx.nick();
        ctx.reply(
            Response::RPL_INVITING,
            vec![nick.clone(), target_nick.clone(), canonical.clone()],
        );
        let invite = Message::from(Command::INVITE(target_nick.clone(), canonical.clone()))
            .with_prefix(ctx.client()?.prefix());
        ctx.out.send(target_uid, invite);

        debug!(channel = %canonical, from = %nick, to = %target_nick, "Invite sent");
        Ok(())
    }
}
