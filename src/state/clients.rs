//! Registry of connected clients.

use super::{Client, Uid};
use crate::error::HandlerError;
use std::collections::HashMap;
use tinyirc_proto::irc_to_lower;

/// All connected clients, indexed by id and by case-folded nickname.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<Uid, Client>,
    nicks: HashMap<String, Uid>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly accepted connection.
    pub fn insert(&mut self, client: Client) {
        self.clients.insert(client.uid, client);
    }

    /// Forget a client, releasing its nickname.
    pub fn remove(&mut self, uid: Uid) -> Option<Client> {
        let client = self.clients.remove(&uid)?;
        if let Some(nick) = client.nick() {
            self.nicks.remove(&irc_to_lower(nick));
        }
        Some(client)
    }

    pub fn get(&self, uid: Uid) -> Option<&Client> {
        self.clients.get(&uid)
    }

    pub fn get_mut(&mut self, uid: Uid) -> Option<&mut Client> {
        self.clients.get_mut(&uid)
    }

    /// Look up the holder of a nickname (case-insensitive).
    pub fn find_nick(&self, nick: &str) -> Option<Uid> {
        self.nicks.get(&irc_to_lower(nick)).copied()
    }

    /// Give `uid` the nickname `nick`, returning its previous one.
    ///
    /// Fails if any other client holds the nick. Re-casing one's own nick is
    /// allowed.
    pub fn assign_nick(&mut self, uid: Uid, nick: &str) -> Result<Option<String>, HandlerError> {
        let folded = irc_to_lower(nick);
        if let Some(&holder) = self.nicks.get(&folded)
            && holder != uid
        {
            return Err(HandlerError::NicknameInUse(nick.to_string()));
        }

        let client = self
            .clients
            .get_mut(&uid)
            .ok_or_else(|| HandlerError::Internal(format!("unknown client {uid}")))?;
        let old = client.nick.replace(nick.to_string());
        if let Some(ref old) = old {
            self.nicks.remove(&irc_to_lower(old));
        }
        self.nicks.insert(folded, uid);
        Ok(old)
    }

    /// Drop the nickname of `uid`, if any.
    pub fn release_nick(&mut self, uid: Uid) {
        if let Some(nick) = self.clients.get_mut(&uid).and_then(|c| c.nick.take()) {
            self.nicks.remove(&irc_to_lower(&nick));
        }
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }
}
