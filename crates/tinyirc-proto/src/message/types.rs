use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::borrowed::MessageRef;
use crate::command::Command;
use crate::error::{MessageParseError, ProtocolError};
use crate::prefix::Prefix;

/// An owned IRC message: optional source plus a command.
///
/// Serializes with a trailing `\r\n`.
///
/// ```
/// use tinyirc_proto::{Command, Message};
///
/// let msg: Message = ":irc.local 332 bob #test :Hello".parse().unwrap();
/// assert_eq!(msg.to_string(), ":irc.local 332 bob #test :Hello\r\n");
///
/// let pong = Message::from(Command::PONG("irc.local".into(), Some("123".into())));
/// assert_eq!(pong.to_string(), "PONG irc.local 123\r\n");
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Message source.
    pub prefix: Option<Prefix>,
    /// The command and its parameters.
    pub command: Command,
}

impl Message {
    /// Attach a source prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Nickname of the sender, if the prefix is a user mask.
    pub fn source_nickname(&self) -> Option<&str> {
        match &self.prefix {
            Some(Prefix::Nickname(nick, _, _)) => Some(nick),
            _ => None,
        }
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Message {
            prefix: None,
            command,
        }
    }
}

impl<'a> From<&MessageRef<'a>> for Message {
    fn from(msg: &MessageRef<'a>) -> Self {
        Message {
            prefix: msg.source(),
            command: Command::new(msg.command, msg.params.to_vec()),
        }
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageRef::parse(s)
            .map(|msg| Message::from(&msg))
            .map_err(|cause: MessageParseError| ProtocolError::InvalidMessage {
                string: s.to_owned(),
                cause,
            })
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        write!(f, "{}\r\n", self.command)
    }
}
