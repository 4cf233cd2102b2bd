//! Nickname and username validation.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format (nickname definition)

/// Default maximum nickname length.
pub const NICK_MAX_LEN: usize = 30;

/// Maximum username (ident) length.
pub const USER_MAX_LEN: usize = 30;

/// Extension trait for checking nicknames.
pub trait NickExt {
    /// `true` if this is a legal nickname.
    ///
    /// - First character: letter or one of `` [ ] \ ` _ ^ { | } ``
    /// - Following characters: the same set plus digits and `-`
    /// - At most [`NICK_MAX_LEN`] characters
    ///
    /// ```
    /// use tinyirc_proto::NickExt;
    ///
    /// assert!("alice".is_valid_nick());
    /// assert!("[away]".is_valid_nick());
    /// assert!(!"9lives".is_valid_nick());
    /// assert!(!"two words".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool;
}

/// Extension trait for checking the username given with USER.
pub trait UserExt {
    /// `true` if this is usable as the `user` part of `nick!user@host`.
    fn is_valid_user(&self) -> bool;
}

#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

impl NickExt for str {
    fn is_valid_nick(&self) -> bool {
        if self.len() > NICK_MAX_LEN {
            return false;
        }

        let mut chars = self.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || is_special(first) => {}
            _ => return false,
        }

        chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}

impl UserExt for str {
    fn is_valid_user(&self) -> bool {
        !self.is_empty()
            && self.len() <= USER_MAX_LEN
            && !self
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || c == '@' || c == '!')
    }
}

impl UserExt for String {
    fn is_valid_user(&self) -> bool {
        self.as_str().is_valid_user()
    }
}
