//! RPL_ISUPPORT (005) token accumulation.
//!
//! Servers advertise feature tokens across one or more 005 replies.
//! Tokens take the forms `NAME=value`, bare `NAME`, and `-NAME` (which
//! withdraws an earlier advertisement).

use std::collections::HashMap;

/// Accumulated ISUPPORT tokens, merged across 005 replies.
#[derive(Debug, Clone, Default)]
pub struct Isupport {
    tokens: HashMap<String, String>,
}

impl Isupport {
    /// Creates an empty token set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the tokens of one 005 reply.
    ///
    /// `params` is the full parameter list of the numeric: the leading
    /// client nickname and the trailing "are supported by this server"
    /// text are skipped.
    pub fn absorb(&mut self, params: &[String]) {
        if params.len() < 3 {
            return;
        }
        for token in &params[1..params.len() - 1] {
            if let Some(name) = token.strip_prefix('-') {
                self.tokens.remove(&name.to_ascii_uppercase());
            } else if let Some((name, value)) = token.split_once('=') {
                self.tokens
                    .insert(name.to_ascii_uppercase(), value.to_string());
            } else {
                self.tokens.insert(token.to_ascii_uppercase(), String::new());
            }
        }
    }

    /// Returns the advertised value for a token name.
    ///
    /// A bare token yields an empty string; an absent one yields `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(&name.to_ascii_uppercase()).map(String::as_str)
    }

    /// Number of advertised tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens have been advertised yet.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(tokens: &[&str]) -> Vec<String> {
        let mut params = vec!["miko".to_string()];
        params.extend(tokens.iter().map(|t| t.to_string()));
        params.push("are supported by this server".to_string());
        params
    }

    #[test]
    fn test_absorb_value_tokens() {
        let mut isupport = Isupport::new();
        isupport.absorb(&params(&["BOT=B", "NETWORK=ExampleNet"]));
        assert_eq!(isupport.get("BOT"), Some("B"));
        assert_eq!(isupport.get("NETWORK"), Some("ExampleNet"));
        assert_eq!(isupport.get("CHANMODES"), None);
    }

    #[test]
    fn test_absorb_merges_across_replies() {
        let mut isupport = Isupport::new();
        isupport.absorb(&params(&["BOT=B"]));
        isupport.absorb(&params(&["CASEMAPPING=ascii"]));
        assert_eq!(isupport.len(), 2);
        assert_eq!(isupport.get("BOT"), Some("B"));
        assert_eq!(isupport.get("CASEMAPPING"), Some("ascii"));
    }

    #[test]
    fn test_bare_token_is_empty_value() {
        let mut isupport = Isupport::new();
        isupport.absorb(&params(&["EXCEPTS"]));
        assert_eq!(isupport.get("EXCEPTS"), Some(""));
    }

    #[test]
    fn test_negation_withdraws_token() {
        let mut isupport = Isupport::new();
        isupport.absorb(&params(&["BOT=B"]));
        isupport.absorb(&params(&["-BOT"]));
        assert_eq!(isupport.get("BOT"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut isupport = Isupport::new();
        isupport.absorb(&params(&["bot=B"]));
        assert_eq!(isupport.get("BOT"), Some("B"));
        assert_eq!(isupport.get("bot"), Some("B"));
    }

    #[test]
    fn test_too_short_reply_is_ignored() {
        let mut isupport = Isupport::new();
        isupport.absorb(&["miko".to_string(), "trailing only".to_string()]);
        assert!(isupport.is_empty());
    }
}
