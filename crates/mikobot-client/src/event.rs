//! Inbound chat events delivered to handlers.

use mikobot_proto::Message;

/// A chat message (channel or private) delivered to the bot.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Nickname of the sender, when the server identified one.
    pub from: Option<String>,
    /// Target the message was addressed to: a channel, or the bot's
    /// own nickname for private messages.
    pub target: String,
    /// Message text.
    pub text: String,
    /// Where replies go: the channel, or the sender for private
    /// messages.
    pub reply_target: String,
}

impl ChatMessage {
    /// Builds a chat event from a PRIVMSG.
    ///
    /// Returns `None` for malformed messages (missing target or text,
    /// or a private message with no identifiable sender).
    pub(crate) fn from_privmsg(msg: &Message, current_nick: &str) -> Option<Self> {
        let target = msg.param(0)?.to_string();
        let text = msg.param(1)?.to_string();
        let from = msg.source.as_ref().map(|source| source.nick.clone());
        let reply_target = if target.eq_ignore_ascii_case(current_nick) {
            from.clone()?
        } else {
            target.clone()
        };
        Some(Self {
            from,
            target,
            text,
            reply_target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_message_replies_to_channel() {
        let msg = Message::parse(":alice!a@b PRIVMSG #lounge :hi").expect("parse");
        let chat = ChatMessage::from_privmsg(&msg, "miko").expect("chat event");
        assert_eq!(chat.from.as_deref(), Some("alice"));
        assert_eq!(chat.target, "#lounge");
        assert_eq!(chat.reply_target, "#lounge");
    }

    #[test]
    fn test_private_message_replies_to_sender() {
        let msg = Message::parse(":alice!a@b PRIVMSG miko :hi").expect("parse");
        let chat = ChatMessage::from_privmsg(&msg, "miko").expect("chat event");
        assert_eq!(chat.reply_target, "alice");
    }

    #[test]
    fn test_private_message_target_is_case_insensitive() {
        let msg = Message::parse(":alice!a@b PRIVMSG MiKo :hi").expect("parse");
        let chat = ChatMessage::from_privmsg(&msg, "miko").expect("chat event");
        assert_eq!(chat.reply_target, "alice");
    }

    #[test]
    fn test_missing_text_is_malformed() {
        let msg = Message::parse(":alice!a@b PRIVMSG #lounge").expect("parse");
        assert!(ChatMessage::from_privmsg(&msg, "miko").is_none());
    }

    #[test]
    fn test_sourceless_private_message_is_malformed() {
        let msg = Message::parse("PRIVMSG miko :hi").expect("parse");
        assert!(ChatMessage::from_privmsg(&msg, "miko").is_none());
    }
}
