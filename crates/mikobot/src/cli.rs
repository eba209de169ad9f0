//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// A small IRC bot that purrs when patted.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "/etc/mikobot/config.json")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        let cli = Cli::parse_from(["mikobot"]);
        assert_eq!(cli.config, PathBuf::from("/etc/mikobot/config.json"));
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::parse_from(["mikobot", "-c", "/tmp/bot.json"]);
        assert_eq!(cli.config, PathBuf::from("/tmp/bot.json"));
    }
}
