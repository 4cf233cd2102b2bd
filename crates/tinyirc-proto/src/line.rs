//! Line framing for tokio.
//!
//! [`LineCodec`] yields one item per `\n`-terminated line and keeps any
//! unterminated tail buffered until more bytes arrive. A line longer than the
//! configured limit does not end the stream: its bytes are skipped up to the
//! next newline and a single [`DecodedLine::Overlong`] is reported instead.
//! A line carrying an illegal control character (a bare `\r`, NUL, BEL, ...)
//! is dropped the same way and reported as [`DecodedLine::Illegal`].

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error;
use crate::format::is_illegal_control_char;
use crate::message::Message;

/// Default maximum line length in bytes, terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// One framed item from the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedLine {
    /// A complete line with `\r\n` / `\n` removed. Invalid UTF-8 is replaced.
    Text(String),
    /// A line that exceeded the limit and was dropped.
    Overlong {
        /// How many bytes were discarded, terminator included.
        length: usize,
    },
    /// A line that contained an illegal control character and was dropped.
    Illegal {
        /// The first offending character.
        ch: char,
    },
}

/// Newline-delimited codec with a length limit.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of the next byte to scan for `\n`.
    next_index: usize,
    max_len: usize,
    /// Bytes thrown away so far while skipping an overlong line.
    discarding: Option<usize>,
}

impl LineCodec {
    /// Codec with the IRC default limit of 512 bytes.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Codec with a custom limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: None,
        }
    }

    /// The configured limit.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Reject a line (terminators already removed) carrying an illegal
    /// control character.
    fn validate_line(s: &str) -> error::Result<()> {
        match s.chars().find(|&ch| is_illegal_control_char(ch)) {
            Some(ch) => Err(error::ProtocolError::IllegalControlChar(ch)),
            None => Ok(()),
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = DecodedLine;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<DecodedLine>> {
        let newline = src[self.next_index..].iter().position(|b| *b == b'\n');

        let Some(offset) = newline else {
            if let Some(skipped) = self.discarding.as_mut() {
                *skipped += src.len();
                src.clear();
                self.next_index = 0;
            } else if src.len() > self.max_len {
                self.discarding = Some(src.len());
                src.clear();
                self.next_index = 0;
            } else {
                self.next_index = src.len();
            }
            return Ok(None);
        };

        let line = src.split_to(self.next_index + offset + 1);
        self.next_index = 0;

        if let Some(skipped) = self.discarding.take() {
            return Ok(Some(DecodedLine::Overlong {
                length: skipped + line.len(),
            }));
        }

        if line.len() > self.max_len {
            return Ok(Some(DecodedLine::Overlong { length: line.len() }));
        }

        let text = String::from_utf8_lossy(&line);
        let text = text.trim_end_matches(['\r', '\n']);
        match Self::validate_line(text) {
            Ok(()) => Ok(Some(DecodedLine::Text(text.to_owned()))),
            Err(error::ProtocolError::IllegalControlChar(ch)) => {
                Ok(Some(DecodedLine::Illegal { ch }))
            }
            Err(e) => Err(e),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<DecodedLine>> {
        // An unterminated tail at EOF is never dispatched.
        let decoded = self.decode(src)?;
        if decoded.is_none() {
            src.clear();
            self.next_index = 0;
            self.discarding = None;
        }
        Ok(decoded)
    }
}

impl Encoder<Message> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend_from_slice(msg.to_string().as_bytes());
        Ok(())
    }
}
