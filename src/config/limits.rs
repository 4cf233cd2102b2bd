//! Per-connection limits configuration.

use serde::Deserialize;

/// Per-connection limits.
///
/// These keep one client from holding unbounded memory on the server,
/// either through a single huge line or by not reading its replies.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted line length in bytes, CRLF included (default: 512).
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Outbound messages queued per client before it is dropped (default: 256).
    #[serde(default = "default_sendq")]
    pub sendq: usize,
    /// Topics longer than this are truncated (default: 390).
    #[serde(default = "default_topic_length")]
    pub topic_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            sendq: default_sendq(),
            topic_length: default_topic_length(),
        }
    }
}

fn default_max_line_length() -> usize {
    512
}

fn default_sendq() -> usize {
    256
}

fn default_topic_length() -> usize {
    390
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.max_line_length, 512);
        assert_eq!(limits.sendq, 256);
        assert_eq!(limits.topic_length, 390);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let limits: LimitsConfig = toml::from_str("sendq = 16").unwrap();
        assert_eq!(limits.sendq, 16);
        assert_eq!(limits.max_line_length, 512);
    }
}
