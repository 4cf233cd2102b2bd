//! State management module.
//!
//! Contains the Matrix (server state), its registries, and the actor task
//! that owns it.

mod actor;
mod channel;
mod channels;
mod client;
mod clients;
mod matrix;
mod uid;

pub use actor::{MatrixActor, MatrixEvent};
pub use channel::{Channel, Topic};
pub use channels::ChannelRegistry;
pub use client::{Client, RegistrationState};
pub use clients::ClientRegistry;
pub use matrix::{Matrix, ServerInfo};
pub use uid::{Uid, UidGenerator};
