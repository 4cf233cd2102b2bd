//! Registry of channels.

use super::{Channel, Uid};
use std::collections::BTreeMap;
use tinyirc_proto::irc_to_lower;

/// What happened to a channel when a member left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Departure {
    /// Member promoted to operator, if the operator left.
    pub promoted: Option<Uid>,
    /// The channel became empty and was deleted.
    pub deleted: bool,
}

/// All channels, keyed by case-folded name.
///
/// Iteration is in folded-name order.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: BTreeMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(&irc_to_lower(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(&irc_to_lower(name))
    }

    /// Add a new channel. Returns `false` (and keeps the existing one) if the
    /// name is taken.
    pub fn create(&mut self, channel: Channel) -> bool {
        let key = irc_to_lower(channel.name());
        if self.channels.contains_key(&key) {
            return false;
        }
        self.channels.insert(key, channel);
        true
    }

    /// Remove `uid` from a channel, promoting a new operator and deleting the
    /// channel once it is empty.
    ///
    /// Returns `None` if the channel does not exist or `uid` was not a member.
    pub fn depart(&mut self, name: &str, uid: Uid) -> Option<Departure> {
        let key = irc_to_lower(name);
        let channel = self.channels.get_mut(&key)?;
        if !channel.is_member(uid) {
            return None;
        }

        let promoted = channel.remove_member(uid);
        let deleted = channel.is_empty();
        if deleted {
            self.channels.remove(&key);
        }
        Some(Departure { promoted, deleted })
    }

    /// Names of every channel `uid` is in.
    pub fn names_for(&self, uid: Uid) -> Vec<String> {
        self.channels
            .values()
            .filter(|c| c.is_member(uid))
            .map(|c| c.name().to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }
}
