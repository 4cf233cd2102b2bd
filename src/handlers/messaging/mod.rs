//! Messaging command handlers (PRIVMSG, NOTICE) and plain-text relay.

mod notice;
mod plain;
mod privmsg;
mod routing;

pub use notice::NoticeHandler;
pub use plain::relay_plain_text;
pub use privmsg::PrivmsgHandler;
