//! NOTICE command handler.

use super::routing::{Verb, route_to_target};
use crate::handlers::{Context, Handler, HandlerError, HandlerResult};
use tinyirc_proto::MessageRef;

/// Handler for NOTICE command.
///
/// Same routing as PRIVMSG, but no error is ever sent back.
pub struct NoticeHandler;

impl Handler for NoticeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let targets = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let text = msg.arg(1).ok_or(HandlerError::NeedMoreParams)?;
        if text.is_empty() {
            return Ok(());
        }

        for target in targets.split(',').filter(|t| !t.is_empty()) {
            if let Err(error @ HandlerError::Internal(_)) =
                route_to_target(ctx, Verb::Notice, target, text)
            {
                return Err(error);
            }
        }
        Ok(())
    }
}
