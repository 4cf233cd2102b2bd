//! QUIT command handler and the shared disconnect path.

use super::super::{Context, Handler, HandlerResult, Outbox};
use crate::handlers::channel::announce_promotion;
use crate::state::{Client, Matrix, Uid};
use tinyirc_proto::{Command, Message, MessageRef};
use tracing::info;

/// Handler for QUIT command.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let reason = msg.arg(0).filter(|r| !r.is_empty()).unwrap_or("Client Quit");
        disconnect(ctx.matrix, ctx.out, ctx.uid, reason);
        Ok(())
    }
}

/// Remove a client from the server.
///
/// Every peer gets one QUIT, the client leaves all its channels (promoting
/// operators and deleting empty channels), is sent ERROR and its connection
/// is closed. Returns the removed client, or `None` if it was already gone.
pub fn disconnect(matrix: &mut Matrix, out: &mut Outbox, uid: Uid, reason: &str) -> Option<Client> {
    let client = matrix.clients.get(uid)?;
    let host = client.host.clone();

    if client.is_registered() {
        let quit = Message::from(Command::QUIT(Some(reason.to_string()))).with_prefix(client.prefix());
        out.broadcast(matrix.peers_of(uid), &quit);
    }

    for name in matrix.channels.names_for(uid) {
        if let Some(departure) = matrix.channels.depart(&name, uid) {
            if let Some(promoted) = departure.promoted {
                announce_promotion(matrix, out, &name, promoted);
            }
            if departure.deleted {
                info!(channel = %name, "Channel deleted");
            }
        }
    }

    out.send(
        uid,
        Message::from(Command::ERROR(format!("Closing Link: {host} ({reason})"))),
    );
    out.close(uid);

    let client = matrix.clients.remove(uid)?;
    info!(uid = %uid, nick = client.nick_or_star(), %reason, "Client disconnected");
    Some(client)
}

#[cfg(test)]
mod tests {
    use crate::handlers::testbed::TestBed;

    #[test]
    fn dropped_operator_hands_channel_over() {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");
        bed.send(alice, "JOIN #test");
        let bob = bed.register("bob");
        bed.send(bob, "JOIN #test");
        bed.clear();

        bed.drop_connection(alice);

        let channel = bed.matrix.channels.get("#test").expect("channel kept");
        assert!(channel.is_operator(bob));
        assert_eq!(channel.members(), &[bob]);
        assert!(bed.matrix.clients.get(alice).is_none());
        assert_eq!(
            bed.take(bob),
            vec![
                ":alice!alice@127.0.0.1 QUIT :Connection closed",
                ":irc.tinyircd.local MODE #test +o bob",
            ]
        );
    }

    #[test]
    fn quit_reaches_each_peer_once() {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");
        let bob = bed.register("bob");
        let carol = bed.register("carol");
        bed.send(alice, "JOIN #a,#b");
        bed.send(bob, "JOIN #a,#b");
        bed.clear();

        bed.send(alice, "QUIT :gone fishing");

        assert_eq!(bed.take(bob), vec![":alice!alice@127.0.0.1 QUIT :gone fishing",
            ":irc.tinyircd.local MODE #a +o bob",
            ":irc.tinyircd.local MODE #b +o bob",
        ]);
        assert!(bed.take(carol).is_empty());
        assert_eq!(
            bed.take(alice),
            vec!["ERROR :Closing Link: 127.0.0.1 (gone fishing)"]
        );
        assert!(bed.is_closed(alice));
    }

    #[test]
    fn quit_frees_nick_and_empty_channels() {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");
        bed.send(alice, "JOIN #solo");

        bed.send(alice, "QUIT");

        assert_eq!(bed.matrix.channels.len(), 0);
        assert!(bed.matrix.clients.find_nick("alice").is_none());
        bed.register("alice");
    }

    #[test]
    fn unregistered_quit_closes_quietly() {
        let mut bed = TestBed::new();
        let anon = bed.connect();

        bed.send(anon, "QUIT");

        assert_eq!(bed.take(anon), vec!["ERROR :Closing Link: 127.0.0.1 (Client Quit)"]);
        assert!(bed.is_closed(anon));
    }
}
