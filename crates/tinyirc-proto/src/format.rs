//! Control characters in free text.
//!
//! Formatting codes (bold, color, reverse and friends) are part of ordinary
//! chat text. Every other control character is illegal inside a line: the
//! codec refuses lines carrying one, and stored text such as a channel topic
//! is checked again.

/// `true` for the mIRC-style formatting codes and the CTCP delimiter.
#[inline]
pub fn is_irc_format_code(ch: char) -> bool {
    matches!(
        ch,
        '\x01' | '\x02' | '\x03' | '\x04' | '\x0F' | '\x11' | '\x16' | '\x1D' | '\x1E' | '\x1F'
    )
}

/// `true` for a control character that may not appear inside a line.
///
/// This includes a bare `\r` and NUL.
#[inline]
pub fn is_illegal_control_char(ch: char) -> bool {
    ch.is_control() && !is_irc_format_code(ch)
}

/// `true` if `text` contains a control character that is not a formatting code.
///
/// ```
/// use tinyirc_proto::has_forbidden_chars;
///
/// assert!(!has_forbidden_chars("\x02bold\x02 topic"));
/// assert!(has_forbidden_chars("ring\x07"));
/// ```
pub fn has_forbidden_chars(text: &str) -> bool {
    text.chars()
        .any(is_illegal_control_char)
}
