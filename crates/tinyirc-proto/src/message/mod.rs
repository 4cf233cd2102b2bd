//! IRC message types.
//!
//! [`MessageRef`] is what the server parses every incoming line into;
//! [`Message`] is what it builds for replies and broadcasts.

mod borrowed;
mod nom_parser;
mod types;

pub use self::borrowed::MessageRef;
pub use self::types::Message;
