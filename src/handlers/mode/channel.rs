//! Channel mode handling.
//!
//! One change per command: `i`, `t`, `k`, `l`, `b` and `+o`. The change is
//! broadcast to the members exactly as applied.

use super::super::{Context, HandlerError, HandlerResult};
use super::ModeChange;
use crate::error::ChannelError;
use crate::state::Channel;
use tinyirc_proto::{Command, Message, Response};
use tracing::info;

pub(super) fn handle_channel_mode(
    ctx: &mut Context<'_>,
    name: &str,
    modestring: Option<&str>,
    arg: Option<&str>,
) -> HandlerResult {
    let uid = ctx.uid;
    let channel = ctx
        .matrix
        .channels
        .get(name)
        .ok_or_else(|| HandlerError::NoSuchChannel(name.to_string()))?;
    let canonical = channel.name().to_string();

    let Some(modestring) = modestring else {
        send_channel_modes(ctx, &canonical);
        return Ok(());
    };
    if matches!(modestring, "b" | "+b") && arg.is_none() {
        send_ban_list(ctx, &canonical);
        return Ok(());
    }
    if !channel.is_operator(uid) {
        return Err(HandlerError::channel(&canonical, ChannelError::ChanOpPrivsNeeded));
    }
    let change = ModeChange::parse(modestring).ok_or_else(|| {
        HandlerError::channel(&canonical, ChannelError::MalformedMode(modestring.to_string()))
    })?;

    let target_uid = match (change.adding, change.letter) {
        (true, 'o') => {
            let target = arg.ok_or_else(|| {
                HandlerError::channel(&canonical, ChannelError::ModeNeedsParam('o'))
            })?;
            let found = ctx
                .matrix
                .clients
                .find_nick(target)
                .filter(|&t| channel.is_member(t));
            let Some(found) = found else {
                return Err(HandlerError::channel(
                    &canonical,
                    ChannelError::UserNotInChannel(target.to_string()),
                ));
            };
            Some(found)
        }
        _ => None,
    };

    let Some(channel) = ctx.matrix.channels.get_mut(&canonical) else {
        return Err(HandlerError::Internal(format!("channel {canonical} vanished")));
    };
    let applied_arg = apply_change(channel, change, arg, target_uid)
        .map_err(|e| HandlerError::channel(&canonical, e))?;

    let members = channel.members().to_vec();
    let mut args = vec![change.as_string()];
    args.extend(applied_arg);
    let mode = Message::from(Command::MODE(canonical.clone(), args)).with_prefix(ctx.client()?.prefix());
    ctx.out.broadcast(members, &mode);

    info!(channel = %canonical, mode = %change.as_string(), by = %ctx.nick(), "Channel mode changed");
    Ok(())
}

/// Apply one change. Returns the argument to echo in the broadcast.
fn apply_change(
    channel: &mut Channel,
    change: ModeChange,
    arg: Option<&str>,
    target_uid: Option<crate::state::Uid>,
) -> Result<Option<String>, ChannelError> {
    let needs_arg = |letter: char| arg.ok_or(ChannelError::ModeNeedsParam(letter));

    match (change.adding, change.letter) {
        (adding, 'i') => {
            channel.set_invite_only(adding);
            Ok(None)
        }
        (adding, 't') => {
            channel.set_topic_protected(adding);
            Ok(None)
        }
        (true, 'k') => {
            let key = needs_arg('k')?;
            if key.is_empty() {
                return Err(ChannelError::ModeNeedsParam('k'));
            }
            channel.set_key(Some(key.to_string()));
            Ok(Some(key.to_string()))
        }
        (false, 'k') => {
            channel.set_key(None);
            Ok(None)
        }
        (true, 'l') => {
            let raw = needs_arg('l')?;
            let limit = raw
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| ChannelError::InvalidModeParam {
                    mode: 'l',
                    param: raw.to_string(),
                })?;
            channel.set_limit(Some(limit));
            Ok(Some(limit.to_string()))
        }
        (false, 'l') => {
            channel.set_limit(None);
            Ok(None)
        }
        (adding, 'b') => {
            let nick = needs_arg('b')?;
            if adding {
                channel.ban(nick);
            } else {
                channel.unban(nick);
            }
            Ok(Some(nick.to_string()))
        }
        (true, 'o') => {
            let nick = needs_arg('o')?;
            let promoted = target_uid.is_some_and(|t| channel.set_operator(t));
            if !promoted {
                return Err(ChannelError::UserNotInChannel(nick.to_string()));
            }
            Ok(Some(nick.to_string()))
        }
        (_, letter) => Err(ChannelError::UnknownMode(letter)),
    }
}

/// RPL_CHANNELMODEIS. The key is only shown to members.
fn send_channel_modes(ctx: &mut Context<'_>, channel: &str) {
    let Some(chan) = ctx.matrix.channels.get(channel) else {
        return;
    };
    let (modes, mode_args) = chan.mode_string(chan.is_member(ctx.uid));
    let name = chan.name().to_string();

    let mut args = vec![ctx.nick(), name, modes];
    args.extend(mode_args);
    ctx.reply(Response::RPL_CHANNELMODEIS, args);
}

fn send_ban_list(ctx: &mut Context<'_>, channel: &str) {
    let Some(chan) = ctx.matrix.channels.get(channel) else {
        return;
    };
    let name = chan.name().to_string();
    let bans: Vec<String> = chan.bans().map(str::to_string).collect();

    let nick = ctx.nick();
    for ban in bans {
        ctx.reply(Response::RPL_BANLIST, vec![nick.clone(), name.clone(), ban]);
    }
    ctx.reply(
        Response::RPL_ENDOFBANLIST,
        vec![nick, name, "End of channel ban list".to_string()],
    );
}

#[cfg(test)]
mod tests {
    use crate::handlers::testbed::{TestBed, has_numeric};
    use crate::state::Uid;

    fn channel_with_two() -> (TestBed, Uid, Uid) {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");
        let bob = bed.register("bob");
        bed.send(alice, "JOIN #test");
        bed.send(bob, "JOIN #test");
        bed.clear();
        (bed, alice, bob)
    }

    #[test]
    fn invite_only_blocks_uninvited_join() {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");
        bed.send(alice, "JOIN #test");
        let bob = bed.register("bob");
        bed.clear();

        bed.send(alice, "MODE #test +i");
        assert_eq!(bed.take(alice), vec![":alice!alice@127.0.0.1 MODE #test +i"]);

        bed.send(bob, "JOIN #test");
        assert_eq!(
            bed.take(bob),
            vec![":irc.tinyircd.local 473 bob #test :Cannot join channel (+i)"]
        );
        assert!(bed.matrix.channels.get("#test").is_some_and(|c| !c.is_member(bob)));
    }

    #[test]
    fn toggles_flip_one_bit() {
        let (mut bed, alice, _) = channel_with_two();
        bed.send(alice, "MODE #test +t");
        let before = bed.matrix.channels.get("#test").map(|c| c.modes());

        bed.send(alice, "MODE #test +i");
        bed.send(alice, "MODE #test -i");

        assert_eq!(bed.matrix.channels.get("#test").map(|c| c.modes()), before);
        assert!(before.is_some_and(|m| m.topic_protected() && !m.invite_only()));
    }

    #[test]
    fn only_the_operator_may_change_modes() {
        let (mut bed, alice, bob) = channel_with_two();

        bed.send(bob, "MODE #test +i");

        assert_eq!(
            bed.take(bob),
            vec![":irc.tinyircd.local 482 bob #test :You're not channel operator"]
        );
        assert!(bed.take(alice).is_empty());
    }

    #[test]
    fn query_shows_key_to_members_only() {
        let (mut bed, alice, _) = channel_with_two();
        bed.send(alice, "MODE #test +k sesame");
        bed.send(alice, "MODE #test +l 5");
        let carol = bed.register("carol");
        bed.clear();

        bed.send(alice, "MODE #test");
        bed.send(carol, "MODE #test");

        assert_eq!(
            bed.take(alice),
            vec![":irc.tinyircd.local 324 alice #test +kl sesame :5"]
        );
        assert_eq!(bed.take(carol), vec![":irc.tinyircd.local 324 carol #test +kl * :5"]);
    }

    #[test]
    fn key_mode_sets_and_clears() {
        let (mut bed, alice, bob) = channel_with_two();

        bed.send(alice, "MODE #test +k sesame");
        assert_eq!(bed.take(bob), vec![":alice!alice@127.0.0.1 MODE #test +k sesame"]);
        assert_eq!(bed.matrix.channels.get("#test").and_then(|c| c.key()), Some("sesame"));

        bed.send(alice, "MODE #test -k");
        assert_eq!(bed.matrix.channels.get("#test").and_then(|c| c.key()), None);
    }

    #[test]
    fn missing_and_bad_arguments() {
        let (mut bed, alice, _) = channel_with_two();

        bed.send(alice, "MODE #test +k");
        bed.send(alice, "MODE #test +l");
        bed.send(alice, "MODE #test +l zero");
        bed.send(alice, "MODE #test +l 0");

        assert_eq!(
            bed.take(alice),
            vec![
                ":irc.tinyircd.local 461 alice MODE :Not enough parameters",
                ":irc.tinyircd.local 461 alice MODE :Not enough parameters",
                ":irc.tinyircd.local 696 alice #test l zero :Invalid mode parameter",
                ":irc.tinyircd.local 696 alice #test l 0 :Invalid mode parameter",
            ]
        );
        assert_eq!(bed.matrix.channels.get("#test").and_then(|c| c.limit()), None);
    }

    #[test]
    fn unknown_and_malformed_modes() {
        let (mut bed, alice, _) = channel_with_two();

        bed.send(alice, "MODE #test +z");
        bed.send(alice, "MODE #test -o bob");
        bed.send(alice, "MODE #test +it");
        bed.send(alice, "MODE #test i");

        let lines = bed.take(alice);
        assert_eq!(lines[0], ":irc.tinyircd.local 472 alice z :is unknown mode char to me for #test");
        assert!(lines[1].contains(" 472 alice o "));
        assert!(has_numeric(&lines[2..3], "400"));
        assert!(has_numeric(&lines[3..4], "400"));
    }

    #[test]
    fn operator_hand_over() {
        let (mut bed, alice, bob) = channel_with_two();

        bed.send(alice, "MODE #test +o carol");
        assert!(has_numeric(&bed.take(alice), "441"));

        bed.send(alice, "MODE #test +o bob");
        assert_eq!(bed.take(bob), vec![":alice!alice@127.0.0.1 MODE #test +o bob"]);
        let channel = bed.matrix.channels.get("#test").expect("channel");
        assert!(channel.is_operator(bob));
        assert!(!channel.is_operator(alice));
    }

    #[test]
    fn ban_list_query() {
        let (mut bed, alice, bob) = channel_with_two();
        bed.send(alice, "MODE #test +b mallory");
        bed.send(alice, "MODE #test +b eve");
        bed.clear();

        bed.send(bob, "MODE #test b");

        assert_eq!(
            bed.take(bob),
            vec![
                ":irc.tinyircd.local 367 bob #test :eve",
                ":irc.tinyircd.local 367 bob #test :mallory",
                ":irc.tinyircd.local 368 bob #test :End of channel ban list",
            ]
        );
    }

    #[test]
    fn unknown_channel_is_403() {
        let mut bed = TestBed::new();
        let alice = bed.register("alice");

        bed.send(alice, "MODE #nowhere +i");

        assert_eq!(
            bed.take(alice),
            vec![":irc.tinyircd.local 403 alice #nowhere :No such channel"]
        );
    }
}
