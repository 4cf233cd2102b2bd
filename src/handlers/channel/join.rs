//! JOIN command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult, for_each_target};
use super::{send_names, send_topic};
use crate::state::Channel;
use tinyirc_proto::{ChannelExt, Command, Message, MessageRef};
use tracing::info;

/// Handler for JOIN command.
///
/// `JOIN <channel>{,<channel>} [<key>{,<key>}]`
///
/// Keys pair with channels by position, empty list entries included. Each
/// channel is joined (or rejected) independently. The joiner gets the topic
/// and the name list; existing members only see the JOIN.
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let channels = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let keys: Vec<&str> = msg.arg(1).map(|k| k.split(',').collect()).unwrap_or_default();

        for_each_target(ctx, channels, "JOIN", |ctx, name, index| {
            let key = keys.get(index).copied().filter(|k| !k.is_empty());
            join_channel(ctx, name, key)
        })
    }
}

fn join_channel(ctx: &mut Context<'_>, name: &str, key: Option<&str>) -> HandlerResult {
    if !name.is_channel_name() {
        return Err(HandlerError::NoSuchChannel(name.to_string()));
    }

    let uid = ctx.uid;
    let nick = ctx.nick();
    let canonical = match ctx.matrix.channels.get_mut(name) {
        Some(channel) => {
            channel
                .admit(uid, &nick, key)
                .map_err(|e| HandlerError::channel(channel.name(), e))?;
            channel.add_member(uid, &nick);
            channel.name().to_string()
        }
        None => {
            ctx.matrix.channels.create(Channel::new(name, uid, key));
            info!(channel = %name, creator = %nick, channels = ctx.matrix.channels.len(), "Channel created");
            name.to_string()
        }
    };

    let Some(channel) = ctx.matrix.channels.get(&canonical) else {
        return Err(HandlerError::Internal(format!("channel {canonical} vanished")));
    };
    let join = Message::from(Command::JOIN(canonical.clone(), None)).with_prefix(ctx.client()?.prefix());
    let members = channel.members().to_vec();
    ctx.out.broadcast(members, &join);

    ctx.client_mut()?.last_channel = Some(canonical.clone());

    send_topic(ctx, &canonical, false);
    send_names(ctx, &canonical);
    Ok(())
}
