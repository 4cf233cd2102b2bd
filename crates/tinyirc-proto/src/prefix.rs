//! Message source prefixes.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format

use std::fmt::{self, Display, Formatter};

/// The origin of a message: the server itself or a `nick!user@host` mask.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Prefix {
    /// Server name (e.g. `irc.tinyircd.local`).
    ServerName(String),
    /// User mask: (nickname, username, hostname).
    Nickname(String, String, String),
}

impl Prefix {
    /// Build a user mask.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix::Nickname(nick.into(), user.into(), host.into())
    }

    /// Lenient parse of a raw prefix.
    ///
    /// A dot before any `!` or `@` marks a server name; anything else is a
    /// user mask with possibly empty user and host parts.
    pub fn new_from_str(s: &str) -> Self {
        let (name, rest) = match s.find(['!', '@']) {
            Some(idx) => (&s[..idx], &s[idx..]),
            None => (s, ""),
        };

        if rest.is_empty() && name.contains('.') {
            return Prefix::ServerName(name.to_owned());
        }

        let (user, host) = match rest.strip_prefix('!') {
            Some(after) => match after.split_once('@') {
                Some((user, host)) => (user, host),
                None => (after, ""),
            },
            None => ("", rest.strip_prefix('@').unwrap_or("")),
        };

        Prefix::Nickname(name.to_owned(), user.to_owned(), host.to_owned())
    }

    /// The nickname or server name at the front of the prefix.
    pub fn name(&self) -> &str {
        match self {
            Prefix::ServerName(name) | Prefix::Nickname(name, _, _) => name,
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{}", user)?;
                }
                if !host.is_empty() {
                    write!(f, "@{}", host)?;
                }
                Ok(())
            }
        }
    }
}
