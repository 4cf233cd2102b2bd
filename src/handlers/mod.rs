//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! incoming IRC lines to the appropriate handlers.
//!
//! Handlers receive a `MessageRef<'_>` borrowing the decoded line and a
//! [`Context`] holding the exclusively borrowed [`Matrix`](crate::state::Matrix).
//! They never touch sockets: everything they want delivered goes into the
//! [`Outbox`].

mod channel;
mod connection;
mod core;
mod helpers;
mod messaging;
mod mode;

#[cfg(test)]
pub(crate) mod testbed;

pub use self::core::{Context, Handler, Outbox, Outgoing, Registry, for_each_target};
pub use crate::error::{HandlerError, HandlerResult};
pub use connection::disconnect;
pub use helpers::{server_message, server_reply, truncate_to};
