//! Channel-related types and state.

use super::Uid;
use crate::error::ChannelError;
use std::collections::{BTreeSet, HashSet};
use tinyirc_proto::irc_to_lower;

/// Channel mode flags (`+i`, `+k`, `+t`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelModes {
    invite_only: bool,
    key_protected: bool,
    topic_protected: bool,
}

impl ChannelModes {
    pub fn invite_only(&self) -> bool {
        self.invite_only
    }

    pub fn set_invite_only(&mut self, on: bool) {
        self.invite_only = on;
    }

    pub fn key_protected(&self) -> bool {
        self.key_protected
    }

    pub fn set_key_protected(&mut self, on: bool) {
        self.key_protected = on;
    }

    pub fn topic_protected(&self) -> bool {
        self.topic_protected
    }

    pub fn set_topic_protected(&mut self, on: bool) {
        self.topic_protected = on;
    }
}

/// Channel topic with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub text: String,
    pub set_by: String,
    pub set_at: i64,
}

/// One chat room.
///
/// Members are kept in join order. The operator is always a member while the
/// channel is non-empty; empty channels are dropped by the
/// [`ChannelRegistry`](super::ChannelRegistry). Bans and invites hold
/// case-folded nicknames, so they outlive the clients they name.
#[derive(Debug, Clone)]
pub struct Channel {
    name: String,
    members: Vec<Uid>,
    operator: Uid,
    modes: ChannelModes,
    key: Option<String>,
    limit: Option<usize>,
    bans: BTreeSet<String>,
    invited: HashSet<String>,
    topic: Option<Topic>,
}

impl Channel {
    /// Create a channel with `creator` as its only member and operator.
    ///
    /// A non-empty `key` is stored and turns on `+k`.
    pub fn new(name: &str, creator: Uid, key: Option<&str>) -> Self {
        let mut channel = Self {
            name: name.to_string(),
            members: vec![creator],
            operator: creator,
            modes: ChannelModes::default(),
            key: None,
            limit: None,
            bans: BTreeSet::new(),
            invited: HashSet::new(),
            topic: None,
        };
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            channel.set_key(Some(key.to_string()));
        }
        channel
    }

    /// Name as given by the creator.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Uid] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_member(&self, uid: Uid) -> bool {
        self.members.contains(&uid)
    }

    pub fn operator(&self) -> Uid {
        self.operator
    }

    pub fn is_operator(&self, uid: Uid) -> bool {
        self.operator == uid && self.is_member(uid)
    }

    pub fn modes(&self) -> ChannelModes {
        self.modes
    }

    pub fn set_invite_only(&mut self, on: bool) {
        self.modes.set_invite_only(on);
    }

    pub fn set_topic_protected(&mut self, on: bool) {
        self.modes.set_topic_protected(on);
    }

    /// The key, if `+k` is set.
    pub fn key(&self) -> Option<&str> {
        if self.modes.key_protected() {
            self.key.as_deref()
        } else {
            None
        }
    }

    /// Store or clear the key together with the `+k` flag.
    pub fn set_key(&mut self, key: Option<String>) {
        self.modes.set_key_protected(key.is_some());
        self.key = key;
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    pub fn set_topic(&mut self, topic: Option<Topic>) {
        self.topic = topic;
    }

    /// Ban a nickname. Returns `false` if it was already banned.
    pub fn ban(&mut self, nick: &str) -> bool {
        self.bans.insert(irc_to_lower(nick))
    }

    /// Lift a ban. Returns `false` if there was none.
    pub fn unban(&mut self, nick: &str) -> bool {
        self.bans.remove(&irc_to_lower(nick))
    }

    pub fn is_banned(&self, nick: &str) -> bool {
        self.bans.contains(&irc_to_lower(nick))
    }

    /// Banned nicknames, folded, in sorted order.
    pub fn bans(&self) -> impl Iterator<Item = &str> {
        self.bans.iter().map(String::as_str)
    }

    /// Grant a one-time `+i` bypass.
    pub fn invite(&mut self, nick: &str) {
        self.invited.insert(irc_to_lower(nick));
    }

    pub fn is_invited(&self, nick: &str) -> bool {
        self.invited.contains(&irc_to_lower(nick))
    }

    /// Check whether `nick` may join, in the order membership, ban, limit,
    /// invite, key.
    pub fn admit(&self, uid: Uid, nick: &str, key: Option<&str>) -> Result<(), ChannelError> {
        if self.is_member(uid) {
            return Err(ChannelError::UserOnChannel(nick.to_string()));
        }
        if self.is_banned(nick) {
            return Err(ChannelError::BannedFromChan);
        }
        if self.limit.is_some_and(|limit| self.members.len() >= limit) {
            return Err(ChannelError::ChannelIsFull);
        }
        if self.modes.invite_only() && !self.is_invited(nick) {
            return Err(ChannelError::InviteOnlyChan);
        }
        if let Some(expected) = self.key()
            && key != Some(expected)
        {
            return Err(ChannelError::BadChannelKey);
        }
        Ok(())
    }

    /// Add a member. Any pending invite for `nick` is used up.
    pub fn add_member(&mut self, uid: Uid, nick: &str) {
        self.invited.remove(&irc_to_lower(nick));
        if !self.is_member(uid) {
            self.members.push(uid);
        }
    }

    /// Remove a member. If it was the operator and others remain, the
    /// earliest-joined remaining member is promoted and returned.
    pub fn remove_member(&mut self, uid: Uid) -> Option<Uid> {
        let index = self.members.iter().position(|&m| m == uid)?;
        self.members.remove(index);

        if self.operator == uid {
            let successor = *self.members.first()?;
            self.operator = successor;
            return Some(successor);
        }
        None
    }

    /// Hand the operator role to another member.
    pub fn set_operator(&mut self, uid: Uid) -> bool {
        if !self.is_member(uid) {
            return false;
        }
        self.operator = uid;
        true
    }

    /// Mode string and its arguments for RPL_CHANNELMODEIS.
    ///
    /// The key is replaced by `*` unless `show_key` is set.
    pub fn mode_string(&self, show_key: bool) -> (String, Vec<String>) {
        let mut modes = String::from("+");
        let mut args = Vec::new();

        if self.modes.invite_only() {
            modes.push('i');
        }
        if self.modes.topic_protected() {
            modes.push('t');
        }
        if let Some(key) = self.key() {
            modes.push('k');
            args.push(if show_key { key.to_string() } else { "*".to_string() });
        }
        if let Some(limit) = self.limit {
            modes.push('l');
            args.push(limit.to_string());
        }

        (modes, args)
    }
}
