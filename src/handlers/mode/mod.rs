//! MODE command handler.
//!
//! - User modes: `MODE nick [modes]`, query only.
//! - Channel modes: `MODE channel [(+|-)<letter> [arg]]`

mod channel;
mod user;

use super::{Context, Handler, HandlerError, HandlerResult};
use tinyirc_proto::{ChannelExt, MessageRef};

/// Handler for MODE command.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        if target.is_channel_target() {
            channel::handle_channel_mode(ctx, target, msg.arg(1), msg.arg(2))
        } else {
            user::handle_user_mode(ctx, target)
        }
    }
}

/// A single `+x` / `-x` change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModeChange {
    adding: bool,
    letter: char,
}

impl ModeChange {
    /// Accepts exactly a sign followed by one ASCII letter.
    fn parse(modestring: &str) -> Option<Self> {
        let mut chars = modestring.chars();
        let adding = match chars.next()? {
            '+' => true,
            '-' => false,
            _ => return None,
        };
        let letter = chars.next().filter(char::is_ascii_alphabetic)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { adding, letter })
    }

    fn as_string(&self) -> String {
        format!("{}{}", if self.adding { '+' } else { '-' }, self.letter)
    }
}
