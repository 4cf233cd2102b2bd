//! TOPIC command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult, truncate_to};
use crate::error::ChannelError;
use crate::state::Topic;
use chrono::Utc;
use tinyirc_proto::{Command, Message, MessageRef, Response, has_forbidden_chars};
use tracing::info;

/// Handler for TOPIC command.
///
/// `TOPIC <channel> [<topic>]`
///
/// The query form is `TOPIC #chan` with no second parameter at all. An
/// explicit empty trailing parameter (`TOPIC #chan :`) is a set that clears
/// the topic, and is broadcast like any other change.
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let name = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
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

        let Some(text) = msg.arg(1) else {
            send_topic(ctx, &canonical, true);
            return Ok(());
        };

        if channel.modes().topic_protected() && !channel.is_operator(uid) {
            return Err(HandlerError::channel(&canonical, ChannelError::ChanOpPrivsNeeded));
        }
        if has_forbidden_chars(text) {
            return Err(HandlerError::InvalidText);
        }

        let text = truncate_to(text, ctx.matrix.server_info.topic_length).to_string();
        let nick = ctx.nick();
        let prefix = ctx.client()?.prefix();

        let Some(channel) = ctx.matrix.channels.get_mut(&canonical) else {
            return Err(HandlerError::Internal(format!("channel {canonical} vanished")));
        };
        channel.set_topic((!text.is_empty()).then(|| Topic {
            text: text.clone(),
            set_by: nick.clone(),
            set_at: Utc::now().timestamp(),
        }));
        let members = channel.members().to_vec();

        let change = Message::from(Command::TOPIC(canonical.clone(), Some(text))).with_prefix(prefix);
        ctx.out.broadcast(members, &change);

        info!(channel = %canonical, by = %nick, "Topic changed");
        Ok(())
    }
}

/// Send the topic of `channel` to the sender as 332 and 333.
///
/// With no topic set, 331 is sent only if `explicit`, i.e. the client asked.
pub(in crate::handlers) fn send_topic(ctx: &mut Context<'_>, channel: &str, explicit: bool) {
    let nick = ctx.nick();
    let Some(chan) = ctx.matrix.channels.get(channel) else {
        return;
    };
    let name = chan.name().to_string();

    match chan.topic().cloned() {
        Some(topic) => {
            ctx.reply(Response::RPL_TOPIC, vec![nick.clone(), name.clone(), topic.text]);
            ctx.reply(
                Response::RPL_TOPICWHOTIME,
                vec![nick, name, topic.set_by, topic.set_at.to_string()],
            );
        }
        None if explicit => {
            ctx.reply(Response::RPL_NOTOPIC, vec![nick, name, "No topic is set".to_string()]);
        }
        None => {}
    }
}
