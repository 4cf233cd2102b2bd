//! Helper functions for IRC command handlers.

use tinyirc_proto::{Command, Message, Prefix, Response};

/// Helper to create a server reply message (numeric response).
pub fn server_reply(server_name: &str, response: Response, params: Vec<String>) -> Message {
    server_message(server_name, Command::Response(response, params))
}

/// A non-numeric message originating from the server itself.
pub fn server_message(server_name: &str, command: Command) -> Message {
    Message::from(command).with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// Longest prefix of `text` that fits in `max` bytes without splitting a char.
pub fn truncate_to(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
