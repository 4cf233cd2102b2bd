//! Per-connection client record and registration state.

use super::Uid;
use tinyirc_proto::Prefix;

/// How far a connection has progressed through PASS / NICK / USER.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    PassAccepted,
    NickAssigned,
    FullyRegistered,
}

/// One connected client.
///
/// The nickname is only changed through
/// [`ClientRegistry`](super::ClientRegistry) so the nick index stays in sync.
#[derive(Debug, Clone)]
pub struct Client {
    pub uid: Uid,
    /// Peer IP, used as the host part of the source prefix.
    pub host: String,
    pub(super) nick: Option<String>,
    pub username: Option<String>,
    pub realname: Option<String>,
    /// Last PASS value sent.
    pub password: Option<String>,
    pub state: RegistrationState,
    /// Channel that free-text lines are relayed to.
    pub last_channel: Option<String>,
}

impl Client {
    pub fn new(uid: Uid, host: impl Into<String>) -> Self {
        Self {
            uid,
            host: host.into(),
            nick: None,
            username: None,
            realname: None,
            password: None,
            state: RegistrationState::Unregistered,
            last_channel: None,
        }
    }

    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    /// Nickname for reply targets; `*` before one is assigned.
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    pub fn is_registered(&self) -> bool {
        self.state == RegistrationState::FullyRegistered
    }

    /// `nick!user@host` source for messages this client originates.
    pub fn prefix(&self) -> Prefix {
        let nick = self.nick_or_star();
        let user = self.username.as_deref().unwrap_or(nick);
        Prefix::new(nick, user, self.host.as_str())
    }
}
