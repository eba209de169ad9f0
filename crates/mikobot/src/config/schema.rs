//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration for a bot process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Server address in `host:port` form.
    #[serde(default)]
    pub server: String,

    /// Nickname to register with.
    #[serde(default = "default_nick")]
    pub nick: String,

    /// Verbose diagnostics, including wire-level traffic.
    #[serde(default)]
    pub debug: bool,

    /// Connect with TLS.
    #[serde(default)]
    pub tls: bool,

    /// Channels to join after registration, in order. The first one
    /// also receives the keepalive meow.
    #[serde(default)]
    pub channels: Vec<String>,

    /// Tunables for the reply handlers.
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            nick: default_nick(),
            debug: false,
            tls: false,
            channels: Vec::new(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Tunables for the bot's reactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Lower bound of the keepalive meow draw.
    #[serde(default)]
    pub meow_low: i64,

    /// Upper bound of the keepalive meow draw. The meow fires with
    /// probability `1 / (meow_high - meow_low)`; a degenerate range
    /// makes it fire on every ping.
    #[serde(default = "default_meow_high")]
    pub meow_high: i64,

    /// Reply "meow" to any message containing "meow".
    #[serde(default)]
    pub echo_meow: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            meow_low: 0,
            meow_high: default_meow_high(),
            echo_meow: false,
        }
    }
}

fn default_nick() -> String {
    "mikobot".to_string()
}

fn default_meow_high() -> i64 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json() {
        let config: BotConfig =
            serde_json::from_str(r#"{"server": "irc.example.net:6667"}"#).unwrap();
        assert_eq!(config.server, "irc.example.net:6667");
        assert_eq!(config.nick, "mikobot");
        assert!(!config.debug);
        assert!(!config.tls);
        assert!(config.channels.is_empty());
        assert_eq!(config.behavior.meow_low, 0);
        assert_eq!(config.behavior.meow_high, 2);
        assert!(!config.behavior.echo_meow);
    }

    #[test]
    fn test_full_json() {
        let config: BotConfig = serde_json::from_str(
            r##"{
                "server": "irc.example.net:6697",
                "nick": "miko",
                "debug": true,
                "tls": true,
                "channels": ["#lounge", "#meow"],
                "behavior": {"meow_low": 0, "meow_high": 5, "echo_meow": true}
            }"##,
        )
        .unwrap();
        assert_eq!(config.nick, "miko");
        assert!(config.tls);
        assert_eq!(config.channels, vec!["#lounge", "#meow"]);
        assert_eq!(config.behavior.meow_high, 5);
        assert!(config.behavior.echo_meow);
    }
}
