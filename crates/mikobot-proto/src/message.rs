//! Parsing and rendering of protocol lines.

use std::fmt;

use thiserror::Error;

/// Hard protocol cap on a single line, including the trailing CRLF.
pub const MAX_LINE_LEN: usize = 512;

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur while parsing a protocol line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line was empty or contained only whitespace.
    #[error("empty line")]
    Empty,

    /// The line carried tags or a source prefix but no command.
    #[error("missing command")]
    MissingCommand,
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

// =============================================================================
// Source
// =============================================================================

/// The `nick!user@host` origin of a server-delivered message.
///
/// For messages originated by the server itself, `nick` holds the
/// server name and the other fields are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Nickname, or server name for server-originated messages.
    pub nick: String,
    /// Username, when present.
    pub user: Option<String>,
    /// Hostname, when present.
    pub host: Option<String>,
}

impl Source {
    fn parse(raw: &str) -> Self {
        let (rest, host) = match raw.split_once('@') {
            Some((rest, host)) => (rest, Some(host.to_string())),
            None => (raw, None),
        };
        let (nick, user) = match rest.split_once('!') {
            Some((nick, user)) => (nick.to_string(), Some(user.to_string())),
            None => (rest.to_string(), None),
        };
        Self { nick, user, host }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nick)?;
        if let Some(user) = &self.user {
            write!(f, "!{user}")?;
        }
        if let Some(host) = &self.host {
            write!(f, "@{host}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Message
// =============================================================================

/// A single parsed protocol message.
///
/// Only the last parameter may contain spaces; rendering emits it as a
/// trailing parameter when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Origin of the message, when the server included one.
    pub source: Option<Source>,
    /// Command verb or three-digit numeric, uppercased.
    pub command: String,
    /// Positional parameters, trailing parameter last.
    pub params: Vec<String>,
}

impl Message {
    /// Creates an outbound message (no source).
    pub fn new<C, P, I>(command: C, params: I) -> Self
    where
        C: Into<String>,
        P: Into<String>,
        I: IntoIterator<Item = P>,
    {
        Self {
            source: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses one protocol line.
    ///
    /// The trailing CRLF may be present or already stripped. IRCv3
    /// message tags are tolerated but not retained.
    pub fn parse(line: &str) -> ParseResult<Self> {
        let mut rest = line.trim_end_matches(['\r', '\n']);
        if rest.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        if rest.starts_with('@') {
            let (_, after) = rest.split_once(' ').ok_or(ParseError::MissingCommand)?;
            rest = after.trim_start_matches(' ');
        }

        let source = match rest.strip_prefix(':') {
            Some(after) => {
                let (raw, after) = after.split_once(' ').ok_or(ParseError::MissingCommand)?;
                rest = after.trim_start_matches(' ');
                Some(Source::parse(raw))
            }
            None => None,
        };

        if rest.is_empty() {
            return Err(ParseError::MissingCommand);
        }
        let (command, mut rest) = match rest.split_once(' ') {
            Some((command, rest)) => (command, rest.trim_start_matches(' ')),
            None => (rest, ""),
        };

        let mut params = Vec::new();
        while !rest.is_empty() {
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match rest.split_once(' ') {
                Some((param, after)) => {
                    params.push(param.to_string());
                    rest = after.trim_start_matches(' ');
                }
                None => {
                    params.push(rest.to_string());
                    break;
                }
            }
        }

        Ok(Self {
            source,
            command: command.to_ascii_uppercase(),
            params,
        })
    }

    /// Parameter at `index`, if present.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    // =========================================================================
    // Outbound constructors
    // =========================================================================

    /// `NICK <nick>`
    pub fn nick(nick: &str) -> Self {
        Self::new("NICK", [nick])
    }

    /// `USER <username> 0 * :<realname>`
    pub fn user(username: &str, realname: &str) -> Self {
        Self::new("USER", [username, "0", "*", realname])
    }

    /// `JOIN <channel>`
    pub fn join(channel: &str) -> Self {
        Self::new("JOIN", [channel])
    }

    /// `PRIVMSG <target> :<text>`
    pub fn privmsg(target: &str, text: &str) -> Self {
        Self::new("PRIVMSG", [target, text])
    }

    /// `MODE <target> <modes>`
    pub fn mode(target: &str, modes: &str) -> Self {
        Self::new("MODE", [target, modes])
    }

    /// `PONG`, echoing the parameters of the `PING` it answers.
    pub fn pong<P, I>(params: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = P>,
    {
        Self::new("PONG", params)
    }

    /// `QUIT :<reason>`
    pub fn quit(reason: &str) -> Self {
        Self::new("QUIT", [reason])
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, ":{source} ")?;
        }
        f.write_str(&self.command)?;
        let last = self.params.len().wrapping_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            if i == last && (param.is_empty() || param.contains(' ') || param.starts_with(':')) {
                write!(f, " :{param}")?;
            } else {
                write!(f, " {param}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_privmsg_with_source() {
        let msg = Message::parse(":alice!ali@example.net PRIVMSG #lounge :hello there\r\n")
            .expect("should parse");
        let source = msg.source.expect("source present");
        assert_eq!(source.nick, "alice");
        assert_eq!(source.user.as_deref(), Some("ali"));
        assert_eq!(source.host.as_deref(), Some("example.net"));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#lounge", "hello there"]);
    }

    #[test]
    fn test_parse_server_source() {
        let msg = Message::parse(":irc.example.net 001 miko :Welcome").expect("should parse");
        let source = msg.source.expect("source present");
        assert_eq!(source.nick, "irc.example.net");
        assert_eq!(source.user, None);
        assert_eq!(source.host, None);
        assert_eq!(msg.params, vec!["miko", "Welcome"]);
    }

    #[test]
    fn test_parse_without_source() {
        let msg = Message::parse("PING :token-123").expect("should parse");
        assert_eq!(msg.source, None);
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, vec!["token-123"]);
    }

    #[test]
    fn test_parse_skips_tags() {
        let msg = Message::parse("@time=2024-01-01T00:00:00Z :a!b@c PRIVMSG #x :hi")
            .expect("should parse");
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#x", "hi"]);
    }

    #[test]
    fn test_parse_uppercases_command() {
        let msg = Message::parse("privmsg #x :hi").expect("should parse");
        assert_eq!(msg.command, "PRIVMSG");
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(Message::parse("\r\n"), Err(ParseError::Empty));
        assert_eq!(Message::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_source_without_command() {
        assert_eq!(Message::parse(":prefix.only"), Err(ParseError::MissingCommand));
    }

    #[test]
    fn test_parse_trailing_with_colons() {
        let msg = Message::parse("PRIVMSG #x ::-) see you").expect("should parse");
        assert_eq!(msg.params, vec!["#x", ":-) see you"]);
    }

    #[test]
    fn test_render_trailing_space() {
        let msg = Message::privmsg("#lounge", "hello there");
        assert_eq!(msg.to_string(), "PRIVMSG #lounge :hello there");
    }

    #[test]
    fn test_render_single_word_param() {
        assert_eq!(Message::join("#lounge").to_string(), "JOIN #lounge");
        assert_eq!(Message::mode("miko", "+B").to_string(), "MODE miko +B");
    }

    #[test]
    fn test_render_user_registration() {
        assert_eq!(Message::user("miko", "miko").to_string(), "USER miko 0 * miko");
        assert_eq!(
            Message::user("miko", "the miko bot").to_string(),
            "USER miko 0 * :the miko bot"
        );
    }

    #[test]
    fn test_pong_echoes_ping_params() {
        let ping = Message::parse("PING :abc def").expect("should parse");
        let pong = Message::pong(ping.params.clone());
        assert_eq!(pong.to_string(), "PONG :abc def");
    }

    #[test]
    fn test_render_empty_trailing() {
        let msg = Message::new("TOPIC", ["#lounge", ""]);
        assert_eq!(msg.to_string(), "TOPIC #lounge :");
    }
}
