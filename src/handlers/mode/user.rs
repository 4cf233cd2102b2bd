//! User mode handling.
//!
//! No user modes are implemented, so a client may only query its own and
//! always gets `+`.

use super::super::{Context, HandlerError, HandlerResult};
use tinyirc_proto::Response;

pub(super) fn handle_user_mode(ctx: &mut Context<'_>, target: &str) -> HandlerResult {
    let target_uid = ctx
        .matrix
        .clients
        .find_nick(target)
        .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
    if target_uid != ctx.uid {
        return Err(HandlerError::UsersDontMatch);
    }

    let nick = ctx.nick();
    ctx.reply(Response::RPL_UMODEIS, vec![nick, "+".to_string()]);
    Ok(())
}
