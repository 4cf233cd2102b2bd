//! Integration tests for channel flows: JOIN, PRIVMSG, TOPIC and QUIT.

mod common;

use common::TestServer;
use tinyirc_proto::{Command, Response};

#[tokio::test]
async fn test_channel_privmsg_flow() {
    let server = TestServer::spawn(16811).await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.unwrap();
    let mut bob = server.connect("bob").await.unwrap();
    alice.register().await.unwrap();
    bob.register().await.unwrap();

    alice.join("#test").await.unwrap();
    bob.join("#test").await.unwrap();

    // Alice sees Bob arrive.
    let joined = alice
        .recv_until(|m| matches!(&m.command, Command::JOIN(c, _) if c == "#test"))
        .await
        .unwrap();
    assert_eq!(joined.last().and_then(|m| m.source_nickname()), Some("bob"));

    alice.privmsg("#test", "hello from alice").await.unwrap();
    let msg = bob
        .recv_until(|m| matches!(&m.command, Command::PRIVMSG(..)))
        .await
        .unwrap();
    assert_eq!(
        msg.last().map(|m| m.to_string()),
        Some(":alice!alice@127.0.0.1 PRIVMSG #test :hello from alice\r\n".to_string())
    );
}

#[tokio::test]
async fn test_topic_is_stored_and_queried() {
    let server = TestServer::spawn(16812).await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.unwrap();
    let mut bob = server.connect("bob").await.unwrap();
    alice.register().await.unwrap();
    bob.register().await.unwrap();
    alice.join("#test").await.unwrap();
    bob.join("#test").await.unwrap();

    alice.send_raw("TOPIC #test :Hello").await.unwrap();
    bob.recv_until(|m| matches!(&m.command, Command::TOPIC(..)))
        .await
        .unwrap();

    bob.send_raw("TOPIC #test").await.unwrap();
    let topic = bob.recv_numeric(Response::RPL_TOPIC).await.unwrap();
    assert_eq!(topic.to_string(), ":test.server 332 bob #test :Hello\r\n");
}

#[tokio::test]
async fn test_disconnect_promotes_next_member() {
    let server = TestServer::spawn(16813).await.expect("Failed to spawn test server");
    let mut alice = server.connect("alice").await.unwrap();
    let mut bob = server.connect("bob").await.unwrap();
    alice.register().await.unwrap();
    bob.register().await.unwrap();
    alice.join("#test").await.unwrap();
    bob.join("#test").await.unwrap();

    // Close alice's socket without QUIT.
    drop(alice);

    let seen = bob
        .recv_until(|m| matches!(&m.command, Command::MODE(..)))
        .await
        .unwrap();
    assert!(seen.iter().any(|m| matches!(&m.command, Command::QUIT(Some(r)) if r == "Connection closed")));
    assert_eq!(
        seen.last().map(|m| m.to_string()),
        Some(":test.server MODE #test +o bob\r\n".to_string())
    );

    bob.send_raw("NAMES #test").await.unwrap();
    let names = bob.recv_numeric(Response::RPL_NAMREPLY).await.unwrap();
    assert_eq!(names.to_string(), ":test.server 353 bob = #test :@bob\r\n");
}
