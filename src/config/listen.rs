//! Network listener configuration.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Lowest port the server will bind (no privileged ports).
pub const MIN_PORT: u16 = 1024;
/// Highest port the server will bind (below the ephemeral range).
pub const MAX_PORT: u16 = 49151;

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (default `0.0.0.0`).
    #[serde(default = "default_address")]
    pub address: IpAddr,
    /// TCP port (default 6667).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ListenConfig {
    /// The full socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    /// Whether the port lies in the accepted range.
    pub fn port_in_range(&self) -> bool {
        (MIN_PORT..=MAX_PORT).contains(&self.port)
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

fn default_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    6667
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_6667() {
        let listen = ListenConfig::default();
        assert_eq!(listen.socket_addr().to_string(), "0.0.0.0:6667");
        assert!(listen.port_in_range());
    }

    #[test]
    fn port_range_edges() {
        let mut listen = ListenConfig::default();
        for (port, ok) in [(1023, false), (1024, true), (49151, true), (49152, false)] {
            listen.port = port;
            assert_eq!(listen.port_in_range(), ok, "port {port}");
        }
    }
}
