//! Deliveries produced by one dispatch.

use crate::state::Uid;
use tinyirc_proto::Message;

/// One delivery instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Queue a message on a client's connection.
    Send(Uid, Message),
    /// Close a client's connection once its queue drains.
    Close(Uid),
}

/// Ordered list of deliveries.
///
/// Handlers never touch sockets; they append here and the actor delivers
/// after the handler returns.
#[derive(Debug, Default)]
pub struct Outbox {
    items: Vec<Outgoing>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, to: Uid, msg: Message) {
        self.items.push(Outgoing::Send(to, msg));
    }

    /// Queue a copy of `msg` for every recipient.
    pub fn broadcast<I>(&mut self, to: I, msg: &Message)
    where
        I: IntoIterator<Item = Uid>,
    {
        for uid in to {
            self.items.push(Outgoing::Send(uid, msg.clone()));
        }
    }

    pub fn close(&mut self, uid: Uid) {
        self.items.push(Outgoing::Close(uid));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Outgoing> {
        self.items.drain(..)
    }

    /// Wire lines queued for `uid`, without CRLF.
    #[cfg(test)]
    pub fn lines_for(&self, uid: Uid) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Outgoing::Send(to, msg) if *to == uid => {
                    Some(msg.to_string().trim_end().to_string())
                }
                _ => None,
            })
            .collect()
    }

    #[cfg(test)]
    pub fn closes(&self, uid: Uid) -> bool {
        self.items.contains(&Outgoing::Close(uid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UidGenerator;
    use tinyirc_proto::Command;

    #[test]
    fn broadcast_keeps_order() {
        let generator = UidGenerator::new();
        let (a, b) = (generator.next(), generator.next());
        let mut out = Outbox::new();

        out.send(a, Message::from(Command::PING("x".into(), None)));
        out.broadcast([a, b], &Message::from(Command::PONG("y".into(), None)));
        out.close(a);

        assert_eq!(out.lines_for(a), ["PING x", "PONG y"]);
        assert_eq!(out.lines_for(b), ["PONG y"]);
        assert!(out.closes(a));
        assert!(!out.closes(b));
        assert_eq!(out.drain().count(), 4);
        assert!(out.is_empty());
    }
}
