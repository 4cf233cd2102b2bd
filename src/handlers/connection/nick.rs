//! NICK command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::welcome::complete_registration;
use crate::state::RegistrationState;
use tinyirc_proto::{Command, Message, MessageRef, NickExt};
use tracing::{debug, info};

/// Handler for NICK command.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let nick = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let state = ctx.client()?.state;

        // Without a server password the PASS step is implied.
        if state == RegistrationState::Unregistered && ctx.matrix.server_info.password.is_some() {
            return Err(HandlerError::NotRegistered);
        }
        if !nick.is_valid_nick() {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        if state == RegistrationState::FullyRegistered {
            return rename(ctx, nick);
        }

        ctx.matrix.clients.assign_nick(ctx.uid, nick)?;
        let client = ctx.client_mut()?;
        client.state = RegistrationState::NickAssigned;
        let user_pending = client.username.is_some();
        debug!(uid = %ctx.uid, nick, "Nick assigned");

        if user_pending {
            complete_registration(ctx)?;
        }
        Ok(())
    }
}

/// Change the nick of a registered client and tell everyone who can see it.
fn rename(ctx: &mut Context<'_>, nick: &str) -> HandlerResult {
    let old_prefix = ctx.client()?.prefix();
    let old = ctx.matrix.clients.assign_nick(ctx.uid, nick)?;
    if old.as_deref() == Some(nick) {
        return Ok(());
    }

    let change = Message::from(Command::NICK(nick.to_string())).with_prefix(old_prefix);
    let mut recipients = vec![ctx.uid];
    recipients.extend(ctx.matrix.peers_of(ctx.uid));
    ctx.out.broadcast(recipients, &change);

    info!(uid = %ctx.uid, old = ?old, new = nick, "Nick changed");
    Ok(())
}
