//! IRC numeric replies.
//!
//! Only the numerics tinyircd actually emits are listed. Codes are sent as
//! three zero-padded digits.
//!
//! # Reference
//! - RFC 2812 Section 5: Replies
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::MessageParseError;

/// IRC server numeric reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    // === Connection Registration ===
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 002 - Your host is ...
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server name, version, modes
    RPL_MYINFO = 4,

    // === Command Replies ===
    /// 221 - Current user modes
    RPL_UMODEIS = 221,
    /// 322 - One LIST entry
    RPL_LIST = 322,
    /// 323 - End of LIST
    RPL_LISTEND = 323,
    /// 324 - Channel modes
    RPL_CHANNELMODEIS = 324,
    /// 331 - No topic set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 333 - Who set the topic and when
    RPL_TOPICWHOTIME = 333,
    /// 341 - Invite sent
    RPL_INVITING = 341,
    /// 353 - Channel member list
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES
    RPL_ENDOFNAMES = 366,
    /// 367 - One ban entry
    RPL_BANLIST = 367,
    /// 368 - End of ban list
    RPL_ENDOFBANLIST = 368,

    // === Errors ===
    /// 400 - Generic failure with explanation
    ERR_UNKNOWNERROR = 400,
    /// 401 - No such nick/channel
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 412 - No text to send
    ERR_NOTEXTTOSEND = 412,
    /// 417 - Input line too long
    ERR_INPUTTOOLONG = 417,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname in use
    ERR_NICKNAMEINUSE = 433,
    /// 441 - Target not on channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - You're not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 443 - Already on channel
    ERR_USERONCHANNEL = 443,
    /// 451 - You have not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - You may not reregister
    ERR_ALREADYREGISTRED = 462,
    /// 464 - Password incorrect
    ERR_PASSWDMISMATCH = 464,
    /// 471 - Channel is full (+l)
    ERR_CHANNELISFULL = 471,
    /// 472 - Unknown mode character
    ERR_UNKNOWNMODE = 472,
    /// 473 - Invite only (+i)
    ERR_INVITEONLYCHAN = 473,
    /// 474 - Banned (+b)
    ERR_BANNEDFROMCHAN = 474,
    /// 475 - Bad channel key (+k)
    ERR_BADCHANNELKEY = 475,
    /// 482 - You're not channel operator
    ERR_CHANOPRIVSNEEDED = 482,
    /// 502 - Can't change mode for other users
    ERR_USERSDONTMATCH = 502,
    /// 696 - Invalid mode parameter
    ERR_INVALIDMODEPARAM = 696,
}

const ALL: &[Response] = &[
    Response::RPL_WELCOME,
    Response::RPL_YOURHOST,
    Response::RPL_CREATED,
    Response::RPL_MYINFO,
    Response::RPL_UMODEIS,
    Response::RPL_LIST,
    Response::RPL_LISTEND,
    Response::RPL_CHANNELMODEIS,
    Response::RPL_NOTOPIC,
    Response::RPL_TOPIC,
    Response::RPL_TOPICWHOTIME,
    Response::RPL_INVITING,
    Response::RPL_NAMREPLY,
    Response::RPL_ENDOFNAMES,
    Response::RPL_BANLIST,
    Response::RPL_ENDOFBANLIST,
    Response::ERR_UNKNOWNERROR,
    Response::ERR_NOSUCHNICK,
    Response::ERR_NOSUCHCHANNEL,
    Response::ERR_NOTEXTTOSEND,
    Response::ERR_INPUTTOOLONG,
    Response::ERR_UNKNOWNCOMMAND,
    Response::ERR_ERRONEUSNICKNAME,
    Response::ERR_NICKNAMEINUSE,
    Response::ERR_USERNOTINCHANNEL,
    Response::ERR_NOTONCHANNEL,
    Response::ERR_USERONCHANNEL,
    Response::ERR_NOTREGISTERED,
    Response::ERR_NEEDMOREPARAMS,
    Response::ERR_ALREADYREGISTRED,
    Response::ERR_PASSWDMISMATCH,
    Response::ERR_CHANNELISFULL,
    Response::ERR_UNKNOWNMODE,
    Response::ERR_INVITEONLYCHAN,
    Response::ERR_BANNEDFROMCHAN,
    Response::ERR_BADCHANNELKEY,
    Response::ERR_CHANOPRIVSNEEDED,
    Response::ERR_USERSDONTMATCH,
    Response::ERR_INVALIDMODEPARAM,
];

impl Response {
    /// The numeric value.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Look a numeric up by value.
    pub fn from_code(code: u16) -> Option<Response> {
        ALL.iter().copied().find(|r| r.code() == code)
    }

    /// `true` for 4xx/5xx/696 error replies.
    #[inline]
    pub fn is_error(&self) -> bool {
        let code = self.code();
        (400..600).contains(&code) || code == 696
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

impl FromStr for Response {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MessageParseError::InvalidCommand);
        }
        s.parse::<u16>()
            .ok()
            .and_then(Response::from_code)
            .ok_or_else(|| MessageParseError::UnknownNumeric(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_lookup() {
        for response in ALL {
            assert_eq!(Response::from_code(response.code()), Some(*response));
        }
        assert_eq!(Response::from_code(999), None);
    }

    #[test]
    fn displays_zero_padded() {
        assert_eq!(Response::RPL_WELCOME.to_string(), "001");
        assert_eq!(Response::RPL_TOPIC.to_string(), "332");
    }

    #[test]
    fn parses_numeric_tokens() {
        assert_eq!("353".parse::<Response>(), Ok(Response::RPL_NAMREPLY));
        assert_eq!("004".parse::<Response>(), Ok(Response::RPL_MYINFO));
        assert!(matches!(
            "999".parse::<Response>(),
            Err(MessageParseError::UnknownNumeric(_))
        ));
        assert!("12".parse::<Response>().is_err());
    }

    #[test]
    fn error_classification() {
        assert!(Response::ERR_INVITEONLYCHAN.is_error());
        assert!(Response::ERR_INVALIDMODEPARAM.is_error());
        assert!(!Response::RPL_ENDOFNAMES.is_error());
    }
}
