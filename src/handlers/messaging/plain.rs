//! Plain-text relay.
//!
//! Lets a registered client type into a bare TCP session: any line whose
//! first token does not look like a command goes to the last channel it
//! joined as a PRIVMSG.

use crate::handlers::{Context, HandlerError};
use tinyirc_proto::{Command, Message};
use tracing::trace;

/// `FOO` or `123`.
fn looks_like_command(token: &str) -> bool {
    let all_upper = !token.is_empty() && token.chars().all(|c| c.is_ascii_uppercase());
    let numeric = token.len() == 3 && token.chars().all(|c| c.is_ascii_digit());
    all_upper || numeric
}

/// Relay `line` to the sender's last channel.
///
/// Returns `Ok(false)` when the line is not eligible, leaving the caller to
/// treat it as an unknown command.
pub fn relay_plain_text(ctx: &mut Context<'_>, line: &str) -> Result<bool, HandlerError> {
    if !ctx.matrix.server_info.plain_text {
        return Ok(false);
    }
    let first = line.split(' ').next().unwrap_or_default();
    if looks_like_command(first) {
        return Ok(false);
    }

    let client = ctx.client()?;
    if !client.is_registered() {
        return Ok(false);
    }
    let Some(last) = client.last_channel.as_deref() else {
        return Ok(false);
    };
    let Some(channel) = ctx.matrix.channels.get(last).filter(|c| c.is_member(ctx.uid)) else {
        return Ok(false);
    };

    let name = channel.name().to_string();
    let recipients: Vec<_> = channel.members().iter().copied().filter(|&m| m != ctx.uid).collect();
    let msg = Message::from(Command::PRIVMSG(name.clone(), line.to_string())).with_prefix(client.prefix());

    trace!(uid = %ctx.uid, channel = %name, "Plain text relayed");
    ctx.out.broadcast(recipients, &msg);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_shapes() {
        assert!(looks_like_command("JOIN"));
        assert!(looks_like_command("001"));
        assert!(!looks_like_command("hello"));
        assert!(!looks_like_command("Hello"));
        assert!(!looks_like_command("1234"));
        assert!(!looks_like_command(""));
    }
}

#[cfg(test)]
mod relay_tests {
    use crate::config::Config;
    use crate::handlers::testbed::{TestBed, has_numeric};

    #[test]
    fn free_text_goes_to_last_channel() {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");
        let bob = bed.register("bob");
        bed.send(alice, "JOIN #one,#two");
        bed.send(bob, "JOIN #two");
        bed.clear();

        bed.send(alice, "hello there, how is everyone");

        assert_eq!(
            bed.take(bob),
            vec![":alice!alice@127.0.0.1 PRIVMSG #two :hello there, how is everyone"]
        );
        assert!(bed.take(alice).is_empty());
    }

    #[test]
    fn command_shaped_or_slashed_lines_are_unknown() {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");
        bed.send(alice, "JOIN #one");
        bed.clear();

        bed.send(alice, "FROB the widget");
        bed.send(alice, "/frob the widget");

        assert_eq!(
            bed.take(alice),
            vec![
                ":irc.tinyircd.local 421 alice FROB :Unknown command",
                ":irc.tinyircd.local 421 alice frob :Unknown command",
            ]
        );
    }

    #[test]
    fn no_channel_or_disabled_means_unknown() {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");
        bed.send(alice, "hi");
        assert!(has_numeric(&bed.take(alice), "421"));

        let config = Config::from_toml("[server]\nplain_text = false\n").expect("config");
        let mut bed = TestBed::with_config(config);
        let alice = bed.register("alice");
        bed.send(alice, "JOIN #one");
        bed.clear();
        bed.send(alice, "hi");
        assert!(has_numeric(&bed.take(alice), "421"));
    }
}
