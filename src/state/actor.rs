//! Actor model for server state.
//!
//! The `MatrixActor` owns the [`Matrix`] in a single Tokio task. Connection
//! tasks never touch state; they forward [`MatrixEvent`]s and the actor
//! processes them one at a time, in arrival order.
//!
//! # Delivery
//!
//! Handlers fill an [`Outbox`]. The actor then hands each message to the
//! recipient's bounded mailbox with `try_send`, so a slow reader can never
//! stall the actor: a full mailbox disconnects that client with
//! "SendQ exceeded".

use super::{Client, Matrix, Uid};
use crate::handlers::{Context, HandlerError, Outbox, Outgoing, Registry, disconnect, server_reply};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use tinyirc_proto::{Message, Response};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, warn};

/// Capacity of the actor's inbound event queue.
const EVENT_QUEUE: usize = 1024;

/// Events that can be sent to the Matrix actor.
#[derive(Debug)]
pub enum MatrixEvent {
    /// A socket was accepted.
    Connect {
        uid: Uid,
        addr: SocketAddr,
        sender: mpsc::Sender<Message>,
    },
    /// One complete line from a client.
    Line { uid: Uid, line: String },
    /// A line exceeded the configured maximum and was discarded.
    LineTooLong { uid: Uid, length: usize },
    /// A line carried an illegal control character and was discarded.
    IllegalLine { uid: Uid, ch: char },
    /// The socket hit EOF or failed.
    Disconnect { uid: Uid, reason: String },
}

/// The single owner of server state.
pub struct MatrixActor {
    matrix: Matrix,
    registry: Registry,
    mailboxes: HashMap<Uid, mpsc::Sender<Message>>,
}

impl MatrixActor {
    pub fn new(matrix: Matrix, registry: Registry) -> Self {
        Self {
            matrix,
            registry,
            mailboxes: HashMap::new(),
        }
    }

    /// Spawn the actor task and return the handle used to feed it.
    ///
    /// The task ends once every sender has been dropped.
    pub fn spawn(self) -> mpsc::Sender<MatrixEvent> {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE);

        tokio::spawn(async move {
            self.run(rx).await;
        });

        tx
    }

    pub async fn run(mut self, mut rx: mpsc::Receiver<MatrixEvent>) {
        while let Some(event) = rx.recv().await {
            self.handle_event(event);
        }
        debug!("Matrix actor stopped");
    }

    fn handle_event(&mut self, event: MatrixEvent) {
        let mut out = Outbox::new();

        match event {
            MatrixEvent::Connect { uid, addr, sender } => {
                self.matrix.clients.insert(Client::new(uid, addr.ip().to_string()));
                self.mailboxes.insert(uid, sender);
                info!(uid = %uid, %addr, clients = self.matrix.clients.len(), "Client connected");
            }
            MatrixEvent::Line { uid, line } => {
                if self.matrix.clients.get(uid).is_none() {
                    return;
                }
                let mut ctx = Context::new(uid, &mut self.matrix, &mut out);
                if let Err(e) = self.registry.dispatch(&mut ctx, &line) {
                    error!(uid = %uid, error = %e, "Command failed");
                }
            }
            MatrixEvent::LineTooLong { uid, length } => {
                warn!(uid = %uid, length, "Input line too long");
                let nick = self.matrix.nick_of(uid).to_string();
                out.send(
                    uid,
                    server_reply(
                        &self.matrix.server_info.name,
                        Response::ERR_INPUTTOOLONG,
                        vec![nick, "Input line was too long".to_string()],
                    ),
                );
            }
            MatrixEvent::IllegalLine { uid, ch } => {
                warn!(uid = %uid, ?ch, "Dropped line with illegal control character");
                let nick = self.matrix.nick_of(uid).to_string();
                let error = HandlerError::IllegalControlChar(ch);
                if let Some(reply) = error.to_irc_reply(&self.matrix.server_info.name, &nick, "*") {
                    out.send(uid, reply);
                }
            }
            MatrixEvent::Disconnect { uid, reason } => {
                disconnect(&mut self.matrix, &mut out, uid, &reason);
            }
        }

        self.deliver(out);
    }

    /// Hand every queued message to its recipient's mailbox.
    fn deliver(&mut self, mut out: Outbox) {
        if out.is_empty() {
            return;
        }

        let mut overflowed: Vec<Uid> = Vec::new();
        let mut skipped: HashSet<Uid> = HashSet::new();

        for item in out.drain() {
            match item {
                Outgoing::Send(uid, msg) => {
                    if skipped.contains(&uid) {
                        continue;
                    }
                    let Some(mailbox) = self.mailboxes.get(&uid) else {
                        continue;
                    };
                    match mailbox.try_send(msg) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            skipped.insert(uid);
                            overflowed.push(uid);
                        }
                        // Connection task already gone; its Disconnect is on the way.
                        Err(TrySendError::Closed(_)) => {
                            skipped.insert(uid);
                        }
                    }
                }
                Outgoing::Close(uid) => {
                    self.mailboxes.remove(&uid);
                }
            }
        }

        for uid in overflowed {
            if self.mailboxes.remove(&uid).is_none() {
                continue;
            }
            warn!(uid = %uid, "SendQ exceeded");
            let mut out = Outbox::new();
            disconnect(&mut self.matrix, &mut out, uid, "SendQ exceeded");
            self.deliver(out);
        }
    }
}
