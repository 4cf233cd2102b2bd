//! In-process harness for handler tests.
//!
//! Drives the registry against a real `Matrix` without sockets and keeps
//! each client's received lines (CRLF trimmed) until the test takes them.

use super::{Context, Outbox, Outgoing, Registry, disconnect};
use crate::config::Config;
use crate::state::{Client, Matrix, ServerInfo, Uid, UidGenerator};
use std::collections::{HashMap, HashSet};

pub(crate) struct TestBed {
    pub matrix: Matrix,
    registry: Registry,
    uids: UidGenerator,
    inbox: HashMap<Uid, Vec<String>>,
    closed: HashSet<Uid>,
}

impl TestBed {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            matrix: Matrix::new(ServerInfo::from_config(&config)),
            registry: Registry::new(),
            uids: UidGenerator::new(),
            inbox: HashMap::new(),
            closed: HashSet::new(),
        }
    }

    /// Accept a new, unregistered client.
    pub fn connect(&mut self) -> Uid {
        let uid = self.uids.next();
        self.matrix.clients.insert(Client::new(uid, "127.0.0.1"));
        uid
    }

    /// Connect and register with nick = username = `nick`, discarding the welcome.
    pub fn register(&mut self, nick: &str) -> Uid {
        let uid = self.connect();
        self.send(uid, &format!("NICK {nick}"));
        self.send(uid, &format!("USER {nick} 0 * :{nick}"));
        let welcome = self.take(uid);
        assert!(
            welcome.iter().any(|l| l.contains(" 001 ")),
            "{nick} did not register: {welcome:?}"
        );
        uid
    }

    /// Feed one line from `uid` through dispatch.
    pub fn send(&mut self, uid: Uid, line: &str) {
        let mut out = Outbox::new();
        let mut ctx = Context::new(uid, &mut self.matrix, &mut out);
        if let Err(e) = self.registry.dispatch(&mut ctx, line) {
            panic!("internal error dispatching {line:?}: {e}");
        }
        self.collect(out);
    }

    /// The socket of `uid` went away.
    pub fn drop_connection(&mut self, uid: Uid) {
        let mut out = Outbox::new();
        disconnect(&mut self.matrix, &mut out, uid, "Connection closed");
        self.collect(out);
    }

    /// Lines received by `uid` since the last call.
    pub fn take(&mut self, uid: Uid) -> Vec<String> {
        self.inbox.remove(&uid).unwrap_or_default()
    }

    /// Discard everything received so far by all clients.
    pub fn clear(&mut self) {
        self.inbox.clear();
    }

    pub fn is_closed(&self, uid: Uid) -> bool {
        self.closed.contains(&uid)
    }

    fn collect(&mut self, mut out: Outbox) {
        for item in out.drain() {
            match item {
                Outgoing::Send(uid, msg) => {
                    if self.closed.contains(&uid) {
                        continue;
                    }
                    let line = msg.to_string().trim_end().to_string();
                    self.inbox.entry(uid).or_default().push(line);
                }
                Outgoing::Close(uid) => {
                    self.closed.insert(uid);
                }
            }
        }
    }
}

/// True if any line has the given numeric in command position.
pub(crate) fn has_numeric(lines: &[String], code: &str) -> bool {
    lines
        .iter()
        .any(|l| l.split(' ').nth(1) == Some(code))
}
