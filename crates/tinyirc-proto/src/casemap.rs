//! RFC 1459 case mapping.
//!
//! Nicknames and channel names compare case-insensitively, and under
//! `rfc1459` the bracket family is folded as well: `[]\~` are the uppercase
//! forms of `{}|^`. Every registry key in the server is produced by
//! [`irc_to_lower`].

/// Fold a single character.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => c.to_ascii_lowercase(),
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c,
    }
}

/// Fold a whole name into its registry key.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Case-insensitive comparison without allocating.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .chars()
            .zip(b.chars())
            .all(|(x, y)| irc_lower_char(x) == irc_lower_char(y))
}
