//! Nom-based line parser.
//!
//! Grammar accepted from clients:
//!
//! ```text
//! [@tags SP] [:prefix SP] command *( SP middle ) [ SP ":" trailing ]
//! ```
//!
//! The command is any run of non-space characters; deciding whether it names a
//! real command is left to the caller, which lets the server treat free text
//! lines differently from malformed commands.

use nom::{
    bytes::complete::{take_till1, take_while},
    character::complete::char,
    combinator::opt,
    sequence::{preceded, terminated},
    IResult,
};
use smallvec::SmallVec;

/// RFC 2812 allows at most 15 parameters.
pub(crate) const MAX_PARAMS: usize = 15;

fn spaces(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ' ')(input)
}

fn parse_tags(input: &str) -> IResult<&str, &str> {
    terminated(preceded(char('@'), take_till1(|c: char| c == ' ')), spaces)(input)
}

fn parse_prefix(input: &str) -> IResult<&str, &str> {
    terminated(preceded(char(':'), take_till1(|c: char| c == ' ')), spaces)(input)
}

fn parse_command(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == ' ')(input)
}

/// Split the parameter section. Runs of spaces count as one separator.
fn parse_params(input: &str) -> SmallVec<[&str; MAX_PARAMS]> {
    let mut params: SmallVec<[&str; MAX_PARAMS]> = SmallVec::new();
    let mut rest = input.trim_start_matches(' ');

    while !rest.is_empty() {
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }

        // The last slot swallows the remainder as if it were trailing.
        if params.len() == MAX_PARAMS - 1 {
            params.push(rest);
            break;
        }

        let end = rest.find(' ').unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = rest[end..].trim_start_matches(' ');
    }

    params
}

/// A line split into borrowed components.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedLine<'a> {
    pub tags: Option<&'a str>,
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: SmallVec<[&'a str; MAX_PARAMS]>,
}

pub(crate) fn parse_line(input: &str) -> IResult<&str, ParsedLine<'_>> {
    let (input, _) = spaces(input)?;
    let (input, tags) = opt(parse_tags)(input)?;
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, command) = parse_command(input)?;

    Ok((
        "",
        ParsedLine {
            tags,
            prefix,
            command,
            params: parse_params(input),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ParsedLine<'_> {
        parse_line(s).unwrap().1
    }

    #[test]
    fn bare_command() {
        let line = parse("LIST");
        assert_eq!(line.command, "LIST");
        assert!(line.params.is_empty());
        assert_eq!(line.prefix, None);
    }

    #[test]
    fn middles_and_trailing() {
        let line = parse("USER alice 0 * :Alice Liddell");
        assert_eq!(line.command, "USER");
        assert_eq!(&line.params[..], &["alice", "0", "*", "Alice Liddell"]);
    }

    #[test]
    fn empty_trailing_is_a_parameter() {
        let line = parse("TOPIC #test :");
        assert_eq!(&line.params[..], &["#test", ""]);
    }

    #[test]
    fn repeated_spaces_collapse() {
        let line = parse("JOIN    #a   key  ");
        assert_eq!(&line.params[..], &["#a", "key"]);
    }

    #[test]
    fn tags_and_prefix_are_split_off() {
        let line = parse("@id=1;x :nick!u@h PRIVMSG #c :hi there");
        assert_eq!(line.tags, Some("id=1;x"));
        assert_eq!(line.prefix, Some("nick!u@h"));
        assert_eq!(line.command, "PRIVMSG");
        assert_eq!(&line.params[..], &["#c", "hi there"]);
    }

    #[test]
    fn fifteenth_parameter_takes_the_rest() {
        let raw = format!("CMD {} last bits", (1..=14).map(|n| n.to_string()).collect::<Vec<_>>().join(" "));
        let line = parse(&raw);
        assert_eq!(line.params.len(), MAX_PARAMS);
        assert_eq!(line.params[14], "last bits");
    }

    #[test]
    fn missing_command_fails() {
        assert!(parse_line("").is_err());
        assert!(parse_line("   ").is_err());
        assert!(parse_line(":only.prefix").is_err());
    }
}
