//! Command handler registry and dispatch.
//!
//! The `Registry` owns the fixed command table. Each entry carries the
//! handler plus the checks the dispatcher applies before calling it.

use super::context::Context;
use super::traits::Handler;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    channel::{InviteHandler, JoinHandler, ListHandler, NamesHandler, PartHandler, TopicHandler},
    connection::{NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler},
    messaging::{NoticeHandler, PrivmsgHandler, relay_plain_text},
    mode::ModeHandler,
};
use std::collections::HashMap;
use tinyirc_proto::{MessageParseError, MessageRef, is_illegal_control_char};
use tracing::{Level, debug, span};

/// One command table entry.
pub struct CommandSpec {
    handler: Box<dyn Handler>,
    min_args: usize,
    max_args: usize,
    /// Accepted before registration completes.
    pre_registration: bool,
    /// Failures produce no reply (NOTICE).
    silent: bool,
}

impl CommandSpec {
    fn new(handler: impl Handler + 'static, min_args: usize, max_args: usize) -> Self {
        Self {
            handler: Box::new(handler),
            min_args,
            max_args,
            pre_registration: false,
            silent: false,
        }
    }

    fn pre_registration(mut self) -> Self {
        self.pre_registration = true;
        self
    }

    fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    fn check_arity(&self, argc: usize) -> HandlerResult {
        if argc < self.min_args {
            Err(HandlerError::NeedMoreParams)
        } else if argc > self.max_args {
            Err(HandlerError::TooManyParams)
        } else {
            Ok(())
        }
    }
}

/// Registry of command handlers.
pub struct Registry {
    commands: HashMap<&'static str, CommandSpec>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut commands = HashMap::new();

        // Connection/registration handlers
        commands.insert("PASS", CommandSpec::new(PassHandler, 1, 1).pre_registration());
        commands.insert("NICK", CommandSpec::new(NickHandler, 1, 1).pre_registration());
        commands.insert("USER", CommandSpec::new(UserHandler, 1, 4).pre_registration());
        commands.insert("QUIT", CommandSpec::new(QuitHandler, 0, 1).pre_registration());
        commands.insert("PING", CommandSpec::new(PingHandler, 1, 2).pre_registration());
        commands.insert("PONG", CommandSpec::new(PongHandler, 0, 2).pre_registration());

        // Channel handlers
        commands.insert("JOIN", CommandSpec::new(JoinHandler, 1, 2));
        commands.insert("PART", CommandSpec::new(PartHandler, 1, 2));
        commands.insert("TOPIC", CommandSpec::new(TopicHandler, 1, 2));
        commands.insert("NAMES", CommandSpec::new(NamesHandler, 0, 1));
        commands.insert("INVITE", CommandSpec::new(InviteHandler, 2, 2));
        commands.insert("LIST", CommandSpec::new(ListHandler, 0, 1));
        commands.insert("MODE", CommandSpec::new(ModeHandler, 1, 3));

        // Messaging handlers
        commands.insert("PRIVMSG", CommandSpec::new(PrivmsgHandler, 2, 2));
        commands.insert("NOTICE", CommandSpec::new(NoticeHandler, 2, 2).silent());

        Self { commands }
    }

    /// Process one raw line from `ctx.uid`.
    ///
    /// Every failure is reported to the sender here; only internal errors
    /// are returned. A line carrying an illegal control character is refused
    /// whole and never reaches a handler.
    pub fn dispatch(&self, ctx: &mut Context<'_>, line: &str) -> HandlerResult {
        if let Some(ch) = line.chars().find(|&ch| is_illegal_control_char(ch)) {
            debug!(uid = %ctx.uid, ?ch, "Line with illegal control character");
            ctx.report(&HandlerError::IllegalControlChar(ch), "*");
            return Ok(());
        }

        let trimmed = line.trim_start_matches(' ');
        let (text, slashed) = match trimmed.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };

        let msg = match MessageRef::parse(text) {
            Ok(msg) => msg,
            Err(MessageParseError::EmptyMessage) => return Ok(()),
            Err(error) => {
                debug!(uid = %ctx.uid, %error, "Unparseable line");
                if !slashed && relay_plain_text(ctx, text)? {
                    return Ok(());
                }
                let token = text.split(' ').next().unwrap_or_default();
                ctx.report(&HandlerError::UnknownCommand(token.to_string()), token);
                return Ok(());
            }
        };

        let cmd_name = msg.command_name().to_ascii_uppercase();
        let Some(spec) = self.commands.get(cmd_name.as_str()) else {
            if !slashed && relay_plain_text(ctx, msg.raw)? {
                return Ok(());
            }
            let error = HandlerError::UnknownCommand(msg.command_name().to_string());
            ctx.report(&error, &cmd_name);
            return Ok(());
        };

        let result = self.run(ctx, spec, &cmd_name, &msg);
        match result {
            Ok(()) => Ok(()),
            Err(error @ HandlerError::Internal(_)) => Err(error),
            Err(error) => {
                debug!(uid = %ctx.uid, command = %cmd_name, %error, "Command error");
                if !spec.silent {
                    ctx.report(&error, &cmd_name);
                }
                Ok(())
            }
        }
    }

    fn run(&self, ctx: &mut Context<'_>, spec: &CommandSpec, cmd_name: &str, msg: &MessageRef<'_>) -> HandlerResult {
        if !spec.pre_registration && !ctx.client()?.is_registered() {
            return Err(HandlerError::NotRegistered);
        }
        spec.check_arity(msg.args().len())?;

        let irc_span = span!(
            Level::DEBUG,
            "irc.command",
            command = %cmd_name,
            uid = %ctx.uid,
        );
        let _entered = irc_span.enter();
        spec.handler.handle(ctx, msg)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
