//! USER command handler.

use super::super::{Context, Handler, HandlerError, HandlerResult};
use super::welcome::complete_registration;
use crate::state::RegistrationState;
use tinyirc_proto::{MessageRef, UserExt};

/// Handler for USER command.
///
/// `USER <username> [mode] [unused] [realname]`. Before a nick is assigned the
/// fields are kept and registration finishes when NICK succeeds.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let username = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        if !username.is_valid_user() {
            return Err(HandlerError::InvalidUsername(username.to_string()));
        }
        let realname = msg.arg(3).unwrap_or(username);

        let client = ctx.client_mut()?;
        client.username = Some(username.to_string());
        client.realname = Some(realname.to_string());

        if client.state == RegistrationState::NickAssigned {
            complete_registration(ctx)?;
        }
        Ok(())
    }
}
