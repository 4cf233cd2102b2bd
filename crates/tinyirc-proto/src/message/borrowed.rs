//! Zero-copy view of an incoming line.
//!
//! ```
//! use tinyirc_proto::MessageRef;
//!
//! let msg = MessageRef::parse("privmsg #rust :hello, world\r\n").unwrap();
//! assert_eq!(msg.command_name(), "privmsg");
//! assert_eq!(msg.args(), &["#rust", "hello, world"]);
//! ```

use smallvec::SmallVec;

use super::nom_parser::{parse_line, MAX_PARAMS};
use crate::error::MessageParseError;
use crate::prefix::Prefix;

/// A parsed line borrowing from the input.
#[derive(Clone, PartialEq, Debug)]
pub struct MessageRef<'a> {
    /// Raw tags (without `@`), if any. The server ignores them.
    pub tags: Option<&'a str>,
    /// Raw prefix (without `:`), if any.
    pub prefix: Option<&'a str>,
    /// Command token exactly as sent.
    pub command: &'a str,
    /// Parameters, trailing included.
    pub params: SmallVec<[&'a str; MAX_PARAMS]>,
    /// The line with its terminator removed.
    pub raw: &'a str,
}

impl<'a> MessageRef<'a> {
    /// Parse one line. A trailing `\r\n` or `\n` is ignored.
    #[must_use = "parsing result should be handled"]
    pub fn parse(s: &'a str) -> Result<MessageRef<'a>, MessageParseError> {
        let raw = s.trim_end_matches(['\r', '\n']);
        if raw.trim_start_matches(' ').is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let (_, parsed) = parse_line(raw).map_err(|_| MessageParseError::InvalidCommand)?;

        Ok(MessageRef {
            tags: parsed.tags,
            prefix: parsed.prefix,
            command: parsed.command,
            params: parsed.params,
            raw,
        })
    }

    /// The command token as sent (not case-normalized).
    #[inline]
    pub fn command_name(&self) -> &'a str {
        self.command
    }

    /// All parameters.
    #[inline]
    pub fn args(&self) -> &[&'a str] {
        &self.params
    }

    /// One parameter by index.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }

    /// The parsed prefix, if any.
    pub fn source(&self) -> Option<Prefix> {
        self.prefix.map(Prefix::new_from_str)
    }
}
