//! # tinyirc-proto
//!
//! The protocol half of tinyircd: everything that can be said about an IRC
//! line without knowing anything about server state.
//!
//! ## Features
//!
//! - Borrowed line parsing with nom ([`MessageRef`])
//! - Owned messages for replies and broadcasts ([`Message`], [`Command`])
//! - Numeric reply codes ([`Response`])
//! - RFC 1459 case mapping and nickname / channel name validation
//! - A tokio-util line codec that keeps partial lines buffered ([`LineCodec`])
//!
//! ## Quick Start
//!
//! ```rust
//! use tinyirc_proto::{Command, Message, MessageRef, Prefix};
//!
//! let line = MessageRef::parse("JOIN #rust secret").unwrap();
//! assert_eq!(line.command_name(), "JOIN");
//! assert_eq!(line.arg(1), Some("secret"));
//!
//! let reply = Message::from(Command::PRIVMSG("#rust".into(), "hello there".into()))
//!     .with_prefix(Prefix::new("alice", "alice", "127.0.0.1"));
//! assert_eq!(reply.to_string(), ":alice!alice@127.0.0.1 PRIVMSG #rust :hello there\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod command;
pub mod error;
pub mod format;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod nick;
pub mod prefix;
pub mod response;

pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::chan::ChannelExt;
pub use self::command::Command;
pub use self::error::{MessageParseError, ProtocolError};
pub use self::format::{has_forbidden_chars, is_illegal_control_char};
#[cfg(feature = "tokio")]
pub use self::line::{DecodedLine, LineCodec};
pub use self::message::{Message, MessageRef};
pub use self::nick::{NickExt, UserExt};
pub use self::prefix::Prefix;
pub use self::response::Response;
