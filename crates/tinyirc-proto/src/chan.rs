//! Channel name validation.
//!
//! tinyircd only knows network-wide `#` channels. A name is at most
//! [`CHANNEL_MAX_LEN`] characters and never contains a space, a comma (the
//! list separator in JOIN/PART), or any control character.

/// Longest accepted channel name, prefix included.
pub const CHANNEL_MAX_LEN: usize = 50;

/// Extension trait for checking channel names.
pub trait ChannelExt {
    /// `true` if this is an acceptable channel name.
    fn is_channel_name(&self) -> bool;

    /// `true` if this looks like a channel target at all (starts with `#`).
    ///
    /// Used to route MODE and PRIVMSG targets before full validation.
    fn is_channel_target(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        let Some(rest) = self.strip_prefix('#') else {
            return false;
        };

        if rest.is_empty() || self.chars().count() > CHANNEL_MAX_LEN {
            return false;
        }

        !rest
            .chars()
            .any(|c| c == ' ' || c == ',' || c.is_control())
    }

    fn is_channel_target(&self) -> bool {
        self.starts_with('#')
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }

    fn is_channel_target(&self) -> bool {
        self.as_str().is_channel_target()
    }
}
