//! The Matrix - central server state.
//!
//! Holds every client and channel. Exactly one task owns the Matrix (see
//! [`MatrixActor`](super::MatrixActor)), so nothing in here is shared or locked.

use super::{ChannelRegistry, ClientRegistry, Uid};
use crate::config::Config;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// This server's identity and the policy handlers need at dispatch time.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    pub created: DateTime<Utc>,
    /// Password checked when registration completes, if enforced.
    pub password: Option<String>,
    /// Relay free-text lines to the sender's last channel.
    pub plain_text: bool,
    pub topic_length: usize,
}

impl ServerInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            network: config.server.network.clone(),
            version: format!("tinyircd-{}", env!("CARGO_PKG_VERSION")),
            created: Utc::now(),
            password: config.server.required_password().map(str::to_string),
            plain_text: config.server.plain_text,
            topic_length: config.limits.topic_length,
        }
    }
}

/// The Matrix - all mutable server state.
pub struct Matrix {
    /// All connected clients.
    pub clients: ClientRegistry,
    /// All channels.
    pub channels: ChannelRegistry,
    /// This server's identity.
    pub server_info: ServerInfo,
}

impl Matrix {
    pub fn new(server_info: ServerInfo) -> Self {
        Self {
            clients: ClientRegistry::new(),
            channels: ChannelRegistry::new(),
            server_info,
        }
    }

    /// Everyone sharing at least one channel with `uid`, excluding `uid`.
    ///
    /// Each peer appears once, in id order.
    pub fn peers_of(&self, uid: Uid) -> Vec<Uid> {
        let mut peers = BTreeSet::new();
        for channel in self.channels.iter().filter(|c| c.is_member(uid)) {
            peers.extend(channel.members().iter().copied().filter(|&m| m != uid));
        }
        peers.into_iter().collect()
    }

    /// Nickname of `uid`, or `*`.
    pub fn nick_of(&self, uid: Uid) -> &str {
        self.clients.get(uid).map_or("*", |c| c.nick_or_star())
    }
}
