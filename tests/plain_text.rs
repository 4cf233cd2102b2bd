//! Integration tests for netcat-style input.

mod common;

use common::TestServer;
use tinyirc_proto::{Command, Response};

#[tokio::test]
async fn test_bare_text_reaches_last_channel() {
    let server = TestServer::spawn(16831).await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.unwrap();
    let mut bob = server.connect("bob").await.unwrap();
    alice.register().await.unwrap();
    bob.register().await.unwrap();
    alice.join("#chat").await.unwrap();
    bob.join("#chat").await.unwrap();

    // LF-only terminator and a slashed command, as typed into netcat.
    alice.send_bytes(b"/topic #chat :typed by hand\n").await.unwrap();
    alice.send_bytes(b"anyone around?\n").await.unwrap();

    let seen = bob
        .recv_until(|m| matches!(&m.command, Command::PRIVMSG(..)))
        .await
        .unwrap();
    assert!(seen.iter().any(|m| matches!(&m.command, Command::TOPIC(_, Some(t)) if t == "typed by hand")));
    assert_eq!(
        seen.last().map(|m| m.command.clone()),
        Some(Command::PRIVMSG("#chat".into(), "anyone around?".into()))
    );
}

#[tokio::test]
async fn test_bare_text_without_channel_is_unknown() {
    let server = TestServer::spawn_with(16832, "plain_text = true")
        .await
        .expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.unwrap();
    alice.register().await.unwrap();

    alice.send_raw("hello?").await.unwrap();
    alice.recv_numeric(Response::ERR_UNKNOWNCOMMAND).await.unwrap();
}
