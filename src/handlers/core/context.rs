//! Command handler context.

use super::outbox::Outbox;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::server_reply;
use crate::state::{Client, Matrix, Uid};
use tinyirc_proto::{Message, Response};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The client that sent the command.
    pub uid: Uid,
    /// Server state, exclusively borrowed for the duration of the command.
    pub matrix: &'a mut Matrix,
    /// Where replies and broadcasts go.
    pub out: &'a mut Outbox,
}

impl<'a> Context<'a> {
    pub fn new(uid: Uid, matrix: &'a mut Matrix, out: &'a mut Outbox) -> Self {
        Self { uid, matrix, out }
    }

    pub fn server_name(&self) -> &str {
        &self.matrix.server_info.name
    }

    /// The sender's nickname, or `*` before one is assigned.
    pub fn nick(&self) -> String {
        self.matrix.nick_of(self.uid).to_string()
    }

    pub fn client(&self) -> Result<&Client, HandlerError> {
        self.matrix
            .clients
            .get(self.uid)
            .ok_or_else(|| HandlerError::Internal(format!("unknown client {}", self.uid)))
    }

    pub fn client_mut(&mut self) -> Result<&mut Client, HandlerError> {
        let uid = self.uid;
        self.matrix
            .clients
            .get_mut(uid)
            .ok_or_else(|| HandlerError::Internal(format!("unknown client {uid}")))
    }

    /// Send a message to the sender.
    pub fn send(&mut self, msg: Message) {
        self.out.send(self.uid, msg);
    }

    /// Send a numeric from the server to the sender.
    pub fn reply(&mut self, response: Response, args: Vec<String>) {
        let msg = server_reply(self.server_name(), response, args);
        self.send(msg);
    }

    /// Send the reply for a failed command, if it has one.
    pub fn report(&mut self, error: &HandlerError, cmd_name: &str) {
        if let Some(reply) = error.to_irc_reply(self.server_name(), &self.nick(), cmd_name) {
            self.send(reply);
        }
    }
}

/// Run `f` once per comma-separated item, reporting each failure separately.
///
/// Empty items are skipped but still count towards the index passed to `f`,
/// so the index is the item's position in `list`.
pub fn for_each_target<F>(ctx: &mut Context<'_>, list: &str, cmd_name: &str, mut f: F) -> HandlerResult
where
    F: FnMut(&mut Context<'_>, &str, usize) -> HandlerResult,
{
    for (index, target) in list.split(',').enumerate().filter(|(_, t)| !t.is_empty()) {
        if let Err(error) = f(ctx, target, index) {
            if let HandlerError::Internal(_) = error {
                return Err(error);
            }
            ctx.report(&error, cmd_name);
        }
    }
    Ok(())
}
