//! Owned IRC commands.
//!
//! Only the commands tinyircd speaks get typed variants. Anything else, or a
//! known command with an unexpected parameter count, is kept as [`Command::Raw`]
//! so that parsing never loses information.

use std::fmt::{self, Display, Formatter, Write};

use crate::response::Response;

/// IRC command with its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    /// `PASS password`
    PASS(String),
    /// `NICK nickname`
    NICK(String),
    /// `USER username mode realname`
    USER(String, String, String),
    /// `QUIT [message]`
    QUIT(Option<String>),
    /// `JOIN channels [keys]`
    JOIN(String, Option<String>),
    /// `PART channels [message]`
    PART(String, Option<String>),
    /// `TOPIC channel [topic]`
    TOPIC(String, Option<String>),
    /// `NAMES [channels]`
    NAMES(Option<String>),
    /// `LIST [channels]`
    LIST(Option<String>),
    /// `INVITE nickname channel`
    INVITE(String, String),
    /// `MODE target [modestring [args...]]`
    MODE(String, Vec<String>),
    /// `PRIVMSG target text`
    PRIVMSG(String, String),
    /// `NOTICE target text`
    NOTICE(String, String),
    /// `PING token [server]`
    PING(String, Option<String>),
    /// `PONG server [token]`
    PONG(String, Option<String>),
    /// `ERROR message`
    ERROR(String),
    /// Numeric reply with its parameters.
    Response(Response, Vec<String>),
    /// Anything else, command name kept verbatim.
    Raw(String, Vec<String>),
}

impl Command {
    /// Build a command from a name and its parameters.
    ///
    /// The name is matched case-insensitively. Parameter lists that do not fit
    /// a typed variant fall back to [`Command::Raw`].
    pub fn new(name: &str, args: Vec<&str>) -> Command {
        let upper = name.to_ascii_uppercase();
        let owned = |i: usize| args[i].to_owned();
        let opt = |i: usize| args.get(i).map(|s| (*s).to_owned());

        match (upper.as_str(), args.len()) {
            ("PASS", 1) => Command::PASS(owned(0)),
            ("NICK", 1) => Command::NICK(owned(0)),
            ("USER", 4) => Command::USER(owned(0), owned(1), owned(3)),
            ("QUIT", 0 | 1) => Command::QUIT(opt(0)),
            ("JOIN", 1 | 2) => Command::JOIN(owned(0), opt(1)),
            ("PART", 1 | 2) => Command::PART(owned(0), opt(1)),
            ("TOPIC", 1 | 2) => Command::TOPIC(owned(0), opt(1)),
            ("NAMES", 0 | 1) => Command::NAMES(opt(0)),
            ("LIST", 0 | 1) => Command::LIST(opt(0)),
            ("INVITE", 2) => Command::INVITE(owned(0), owned(1)),
            ("MODE", n) if n >= 1 => {
                Command::MODE(owned(0), args[1..].iter().map(|s| (*s).to_owned()).collect())
            }
            ("PRIVMSG", 2) => Command::PRIVMSG(owned(0), owned(1)),
            ("NOTICE", 2) => Command::NOTICE(owned(0), owned(1)),
            ("PING", 1 | 2) => Command::PING(owned(0), opt(1)),
            ("PONG", 1 | 2) => Command::PONG(owned(0), opt(1)),
            ("ERROR", 1) => Command::ERROR(owned(0)),
            _ => match upper.parse::<Response>() {
                Ok(response) => {
                    Command::Response(response, args.iter().map(|s| (*s).to_owned()).collect())
                }
                Err(_) => Command::Raw(
                    name.to_owned(),
                    args.iter().map(|s| (*s).to_owned()).collect(),
                ),
            },
        }
    }

    /// The command name as it appears on the wire.
    pub fn name(&self) -> String {
        match self {
            Command::PASS(_) => "PASS".into(),
            Command::NICK(_) => "NICK".into(),
            Command::USER(..) => "USER".into(),
            Command::QUIT(_) => "QUIT".into(),
            Command::JOIN(..) => "JOIN".into(),
            Command::PART(..) => "PART".into(),
            Command::TOPIC(..) => "TOPIC".into(),
            Command::NAMES(_) => "NAMES".into(),
            Command::LIST(_) => "LIST".into(),
            Command::INVITE(..) => "INVITE".into(),
            Command::MODE(..) => "MODE".into(),
            Command::PRIVMSG(..) => "PRIVMSG".into(),
            Command::NOTICE(..) => "NOTICE".into(),
            Command::PING(..) => "PING".into(),
            Command::PONG(..) => "PONG".into(),
            Command::ERROR(_) => "ERROR".into(),
            Command::Response(resp, _) => resp.to_string(),
            Command::Raw(name, _) => name.clone(),
        }
    }
}

/// `true` if a final parameter must be sent with a leading `:`.
pub fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Write `cmd args...`, colon-prefixing the last argument only when required.
fn write_cmd(f: &mut Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    if let Some((last, init)) = args.split_last() {
        for arg in init {
            f.write_char(' ')?;
            f.write_str(arg)?;
        }
        f.write_char(' ')?;
        if needs_colon_prefix(last) {
            f.write_char(':')?;
        }
        f.write_str(last)?;
    }
    Ok(())
}

/// Write `cmd args...` with the last argument always sent as trailing text.
fn write_cmd_freeform(f: &mut Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    if let Some((last, init)) = args.split_last() {
        for arg in init {
            f.write_char(' ')?;
            f.write_str(arg)?;
        }
        f.write_str(" :")?;
        f.write_str(last)?;
    }
    Ok(())
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(p) => write_cmd(f, "PASS", &[p]),
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            Command::USER(u, m, r) => write_cmd_freeform(f, "USER", &[u, m, "*", r]),
            Command::QUIT(Some(m)) => write_cmd_freeform(f, "QUIT", &[m]),
            Command::QUIT(None) => write_cmd(f, "QUIT", &[]),
            Command::JOIN(c, Some(k)) => write_cmd(f, "JOIN", &[c, k]),
            Command::JOIN(c, None) => write_cmd(f, "JOIN", &[c]),
            Command::PART(c, Some(m)) => write_cmd_freeform(f, "PART", &[c, m]),
            Command::PART(c, None) => write_cmd(f, "PART", &[c]),
            Command::TOPIC(c, Some(t)) => write_cmd_freeform(f, "TOPIC", &[c, t]),
            Command::TOPIC(c, None) => write_cmd(f, "TOPIC", &[c]),
            Command::NAMES(Some(c)) => write_cmd(f, "NAMES", &[c]),
            Command::NAMES(None) => write_cmd(f, "NAMES", &[]),
            Command::LIST(Some(c)) => write_cmd(f, "LIST", &[c]),
            Command::LIST(None) => write_cmd(f, "LIST", &[]),
            Command::INVITE(n, c) => write_cmd(f, "INVITE", &[n, c]),
            Command::MODE(t, args) => {
                let mut all: Vec<&str> = Vec::with_capacity(args.len() + 1);
                all.push(t);
                all.extend(args.iter().map(String::as_str));
                write_cmd(f, "MODE", &all)
            }
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::NOTICE(t, m) => write_cmd_freeform(f, "NOTICE", &[t, m]),
            Command::PING(t, Some(s)) => write_cmd(f, "PING", &[t, s]),
            Command::PING(t, None) => write_cmd(f, "PING", &[t]),
            Command::PONG(s, Some(t)) => write_cmd(f, "PONG", &[s, t]),
            Command::PONG(s, None) => write_cmd(f, "PONG", &[s]),
            Command::ERROR(m) => write_cmd_freeform(f, "ERROR", &[m]),
            Command::Response(resp, args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd_freeform(f, &resp.to_string(), &args)
            }
            Command::Raw(name, args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                write_cmd(f, name, &args)
            }
        }
    }
}
