//! Unified error handling for tinyircd.
//!
//! Handler outcomes are plain values; the dispatcher turns each one into at
//! most one numeric reply addressed to the client that sent the command.

use thiserror::Error;
use tinyirc_proto::{Command, Message, Prefix, Response};

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("too many parameters")]
    TooManyParams,

    #[error("no text to send")]
    NoTextToSend,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("not registered")]
    NotRegistered,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("password mismatch")]
    PasswdMismatch,

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("text contains forbidden characters")]
    InvalidText,

    #[error("illegal control character {0:?} in line")]
    IllegalControlChar(char),

    #[error("cannot change mode for other users")]
    UsersDontMatch,

    #[error("{channel}: {error}")]
    Channel { channel: String, error: ChannelError },

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Shorthand for a channel-scoped failure.
    pub fn channel(channel: &str, error: ChannelError) -> Self {
        Self::Channel {
            channel: channel.to_string(),
            error,
        }
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let (response, args) = match self {
            Self::NeedMoreParams => (
                Response::ERR_NEEDMOREPARAMS,
                vec![nick.to_string(), cmd_name.to_string(), "Not enough parameters".to_string()],
            ),
            Self::TooManyParams => (
                Response::ERR_UNKNOWNERROR,
                vec![nick.to_string(), cmd_name.to_string(), "Too many parameters".to_string()],
            ),
            Self::NoTextToSend => (
                Response::ERR_NOTEXTTOSEND,
                vec![nick.to_string(), "No text to send".to_string()],
            ),
            Self::NicknameInUse(bad_nick) => (
                Response::ERR_NICKNAMEINUSE,
                vec![nick.to_string(), bad_nick.clone(), "Nickname is already in use".to_string()],
            ),
            Self::ErroneousNickname(bad_nick) => (
                Response::ERR_ERRONEUSNICKNAME,
                vec![nick.to_string(), bad_nick.clone(), "Erroneous nickname".to_string()],
            ),
            Self::InvalidUsername(_) => (
                Response::ERR_UNKNOWNERROR,
                vec![nick.to_string(), cmd_name.to_string(), "Invalid username".to_string()],
            ),
            Self::NotRegistered => (
                Response::ERR_NOTREGISTERED,
                vec![nick.to_string(), "You have not registered".to_string()],
            ),
            Self::AlreadyRegistered => (
                Response::ERR_ALREADYREGISTRED,
                vec![nick.to_string(), "You may not reregister".to_string()],
            ),
            Self::PasswdMismatch => (
                Response::ERR_PASSWDMISMATCH,
                vec![nick.to_string(), "Password incorrect".to_string()],
            ),
            Self::NoSuchNick(target) => (
                Response::ERR_NOSUCHNICK,
                vec![nick.to_string(), target.clone(), "No such nick/channel".to_string()],
            ),
            Self::NoSuchChannel(bad_chan) => (
                Response::ERR_NOSUCHCHANNEL,
                vec![nick.to_string(), bad_chan.clone(), "No such channel".to_string()],
            ),
            Self::UnknownCommand(cmd) => (
                Response::ERR_UNKNOWNCOMMAND,
                vec![nick.to_string(), cmd.clone(), "Unknown command".to_string()],
            ),
            Self::InvalidText => (
                Response::ERR_UNKNOWNERROR,
                vec![
                    nick.to_string(),
                    cmd_name.to_string(),
                    "Text contains forbidden characters".to_string(),
                ],
            ),
            Self::IllegalControlChar(_) => (
                Response::ERR_UNKNOWNERROR,
                vec![nick.to_string(), "Illegal control character in line".to_string()],
            ),
            Self::UsersDontMatch => (
                Response::ERR_USERSDONTMATCH,
                vec![nick.to_string(), "Cannot change mode for other users".to_string()],
            ),
            Self::Channel { channel, error } => {
                return Some(error.to_irc_reply(server_name, nick, channel, cmd_name));
            }

            // No client-visible reply
            Self::Internal(_) => return None,
        };

        Some(numeric(server_name, response, args))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Channel Errors
// ============================================================================

/// Channel operation errors.
///
/// These carry no channel name; [`HandlerError::Channel`] adds it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("user {0} is already on that channel")]
    UserOnChannel(String),

    #[error("cannot join channel (+b)")]
    BannedFromChan,

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("unknown mode {0}")]
    UnknownMode(char),

    #[error("invalid parameter {param} for mode {mode}")]
    InvalidModeParam { mode: char, param: String },

    #[error("mode {0} needs a parameter")]
    ModeNeedsParam(char),

    #[error("malformed mode string {0}")]
    MalformedMode(String),
}

impl ChannelError {
    /// Convert to an IRC error reply message.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, channel: &str, cmd_name: &str) -> Message {
        let (response, args) = match self {
            Self::NotOnChannel => (
                Response::ERR_NOTONCHANNEL,
                vec![nick.to_string(), channel.to_string(), "You're not on that channel".to_string()],
            ),
            Self::ChanOpPrivsNeeded => (
                Response::ERR_CHANOPRIVSNEEDED,
                vec![nick.to_string(), channel.to_string(), "You're not channel operator".to_string()],
            ),
            Self::UserNotInChannel(target) => (
                Response::ERR_USERNOTINCHANNEL,
                vec![nick.to_string(), target.clone(), channel.to_string(), "They aren't on that channel".to_string()],
            ),
            Self::UserOnChannel(target) => (
                Response::ERR_USERONCHANNEL,
                vec![nick.to_string(), target.clone(), channel.to_string(), "is already on channel".to_string()],
            ),
            Self::BannedFromChan => (
                Response::ERR_BANNEDFROMCHAN,
                vec![nick.to_string(), channel.to_string(), "Cannot join channel (+b)".to_string()],
            ),
            Self::InviteOnlyChan => (
                Response::ERR_INVITEONLYCHAN,
                vec![nick.to_string(), channel.to_string(), "Cannot join channel (+i)".to_string()],
            ),
            Self::ChannelIsFull => (
                Response::ERR_CHANNELISFULL,
                vec![nick.to_string(), channel.to_string(), "Cannot join channel (+l)".to_string()],
            ),
            Self::BadChannelKey => (
                Response::ERR_BADCHANNELKEY,
                vec![nick.to_string(), channel.to_string(), "Cannot join channel (+k)".to_string()],
            ),
            Self::UnknownMode(mode) => (
                Response::ERR_UNKNOWNMODE,
                vec![nick.to_string(), mode.to_string(), format!("is unknown mode char to me for {channel}")],
            ),
            Self::InvalidModeParam { mode, param } => (
                Response::ERR_INVALIDMODEPARAM,
                vec![
                    nick.to_string(),
                    channel.to_string(),
                    mode.to_string(),
                    param.clone(),
                    "Invalid mode parameter".to_string(),
                ],
            ),
            Self::ModeNeedsParam(_) => (
                Response::ERR_NEEDMOREPARAMS,
                vec![nick.to_string(), cmd_name.to_string(), "Not enough parameters".to_string()],
            ),
            Self::MalformedMode(modes) => (
                Response::ERR_UNKNOWNERROR,
                vec![nick.to_string(), channel.to_string(), format!("Malformed mode string {modes}")],
            ),
        };

        numeric(server_name, response, args)
    }
}

fn numeric(server_name: &str, response: Response, args: Vec<String>) -> Message {
    Message {
        prefix: Some(Prefix::ServerName(server_name.to_string())),
        command: Command::Response(response, args),
    }
}
