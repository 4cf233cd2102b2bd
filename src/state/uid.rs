//! Connection identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable handle for one client connection.
///
/// Never reused while the process runs, so a stale handle can only miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(u64);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base36_encode_6(self.0))
    }
}

/// Generates unique connection ids.
///
/// Displayed as 6 base36 characters, e.g. `AAAAAB`.
pub struct UidGenerator {
    counter: AtomicU64,
}

impl UidGenerator {
    /// Create a new generator starting at `AAAAAA`.
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> Uid {
        Uid(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for UidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a number as a 6-character base36 string.
fn base36_encode_6(mut n: u64) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut result = [b'A'; 6];

    for slot in result.iter_mut().rev() {
        *slot = CHARS[(n % 36) as usize];
        n /= 36;
    }

    String::from_utf8_lossy(&result).into_owned()
}
