//! The command handler trait.

use super::context::Context;
use crate::error::HandlerResult;
use tinyirc_proto::MessageRef;

/// A command handler.
///
/// Handlers run inside the matrix actor with exclusive access to server state,
/// so they are synchronous. Arity and the registration gate have already been
/// checked when `handle` is called.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult;
}
