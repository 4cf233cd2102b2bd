//! Channel command handlers.
//!
//! Handles JOIN, PART, TOPIC, NAMES, INVITE, LIST commands.

mod invite;
mod join;
mod list;
mod names;
mod part;
mod topic;

pub use invite::InviteHandler;
pub use join::JoinHandler;
pub use list::ListHandler;
pub use names::NamesHandler;
pub use part::PartHandler;
pub use topic::TopicHandler;

pub(super) use names::send_names;
pub(super) use topic::send_topic;

use super::{Outbox, server_message};
use crate::state::{Matrix, Uid};
use tinyirc_proto::Command;

/// Tell the remaining members of `channel` that `promoted` is now operator.
pub(super) fn announce_promotion(matrix: &Matrix, out: &mut Outbox, channel: &str, promoted: Uid) {
    let Some(chan) = matrix.channels.get(channel) else {
        return;
    };
    let mode = server_message(
        &matrix.server_info.name,
        Command::MODE(
            chan.name().to_string(),
            vec!["+o".to_string(), matrix.nick_of(promoted).to_string()],
        ),
    );
    out.broadcast(chan.members().iter().copied(), &mode);
}
