//! Test server management.
//!
//! Spawns and manages tinyircd instances for integration testing.

use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Holds the config file for the lifetime of the process.
    _dir: TempDir,
}

impl TestServer {
    /// Spawn a server on `port` with default settings.
    pub async fn spawn(port: u16) -> anyhow::Result<Self> {
        Self::spawn_with(port, "").await
    }

    /// Spawn a server on `port`, appending `extra` to the `[server]` table.
    pub async fn spawn_with(port: u16, extra: &str) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("tinyircd.toml");
        let config_content = format!(
            r#"
[server]
name = "test.server"
network = "TestNet"
{extra}

[listen]
address = "127.0.0.1"
port = {port}

[limits]
sendq = 256
"#
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(env!("CARGO_BIN_EXE_tinyircd"))
            .arg(&config_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            _dir: dir,
        };

        // Wait for server to start listening
        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..30 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 3 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Create a new test client connected to this server.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address(), nick).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
