//! CTCP framing helpers.
//!
//! Client-to-client requests travel inside PRIVMSG text, wrapped in a
//! pair of 0x01 bytes. The only form this bot cares about is `ACTION`,
//! the emote encoding clients send for `/me`.

/// The CTCP delimiter byte.
const DELIMITER: char = '\u{1}';

/// Wraps text in a CTCP `ACTION`.
pub fn action(text: &str) -> String {
    format!("{DELIMITER}ACTION {text}{DELIMITER}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_is_delimited() {
        let emote = action("pats miko");
        assert_eq!(emote, "\u{1}ACTION pats miko\u{1}");
    }
}
