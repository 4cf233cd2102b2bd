//! Test IRC client.
//!
//! Provides an IRC client for integration testing that can send commands
//! and assert on received responses.

use std::time::Duration;
use tinyirc_proto::{Command, Message, Response};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test IRC client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        let (read_half, write_half) = stream.into_split();
        let reader = BufReader::new(read_half);
        let writer = BufWriter::new(write_half);

        Ok(Self {
            reader,
            writer,
            nick: nick.to_string(),
        })
    }

    /// Send a raw IRC line. CRLF is added if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Send bytes exactly as given.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send an IRC command.
    pub async fn send(&mut self, cmd: Command) -> anyhow::Result<()> {
        let msg = Message::from(cmd);
        self.send_raw(&msg.to_string()).await
    }

    /// Receive a single message from the server.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a message with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Message> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("Connection closed");
        }

        line.trim_end()
            .parse::<Message>()
            .map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive multiple messages until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Message>>
    where
        F: FnMut(&Message) -> bool,
    {
        let mut messages = Vec::new();
        loop {
            let msg = self.recv().await?;
            let done = predicate(&msg);
            messages.push(msg);
            if done {
                break;
            }
        }
        Ok(messages)
    }

    /// Receive until a numeric reply with `response` arrives.
    pub async fn recv_numeric(&mut self, response: Response) -> anyhow::Result<Message> {
        let mut messages = self
            .recv_until(|msg| matches!(&msg.command, Command::Response(r, _) if *r == response))
            .await?;
        messages
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no {response} received"))
    }

    /// Read and discard whatever arrives within a short window.
    pub async fn drain(&mut self) {
        while self.recv_timeout(Duration::from_millis(150)).await.is_ok() {}
    }

    /// Register with the server (NICK + USER).
    pub async fn register(&mut self) -> anyhow::Result<()> {
        self.send(Command::NICK(self.nick.clone())).await?;
        self.send(Command::USER(
            self.nick.clone(),
            "0".to_string(),
            format!("Test User {}", self.nick),
        ))
        .await?;

        // Wait for RPL_MYINFO (004), the end of the welcome burst
        self.recv_numeric(Response::RPL_MYINFO).await?;
        Ok(())
    }

    /// Join a channel and wait for the end of its NAMES list.
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<()> {
        self.send(Command::JOIN(channel.to_string(), None)).await?;
        self.recv_numeric(Response::RPL_ENDOFNAMES).await?;
        Ok(())
    }

    /// Send a PRIVMSG.
    pub async fn privmsg(&mut self, target: &str, text: &str) -> anyhow::Result<()> {
        self.send(Command::PRIVMSG(target.to_string(), text.to_string()))
            .await
    }

    /// Send QUIT.
    pub async fn quit(&mut self, reason: Option<String>) -> anyhow::Result<()> {
        self.send(Command::QUIT(reason)).await
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }
}
