//! Core handler infrastructure.
//!
//! The handler trait, the per-command context, the outbox handlers write into,
//! and the registry that dispatches raw lines to handlers.

pub mod context;
pub mod outbox;
pub mod registry;
pub mod traits;

pub use context::{Context, for_each_target};
pub use outbox::{Outbox, Outgoing};
pub use registry::Registry;
pub use traits::Handler;
