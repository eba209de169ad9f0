//! Configuration validation utilities.

use std::collections::HashSet;

use tracing::warn;

use super::error::{ConfigError, ConfigResult};
use super::schema::BotConfig;

/// Validates the entire configuration.
pub fn validate_config(config: &BotConfig) -> ConfigResult<()> {
    validate_server(&config.server)?;
    validate_nick(&config.nick)?;
    validate_channels(&config.channels)?;

    // A degenerate meow range is allowed but almost certainly unintended.
    if config.behavior.meow_high <= config.behavior.meow_low {
        warn!(
            meow_low = config.behavior.meow_low,
            meow_high = config.behavior.meow_high,
            "Degenerate meow range; the keepalive meow will always fire"
        );
    }

    Ok(())
}

/// Validates the server address.
fn validate_server(server: &str) -> ConfigResult<()> {
    if server.is_empty() {
        return Err(ConfigError::missing_field("server"));
    }

    let Some((host, port)) = server.rsplit_once(':') else {
        return Err(ConfigError::validation(format!(
            "Server must be in host:port form, got: {server}"
        )));
    };

    if host.is_empty() {
        return Err(ConfigError::validation("Server host cannot be empty"));
    }

    if port.parse::<u16>().is_err() {
        return Err(ConfigError::validation(format!(
            "Server port must be a number in 0-65535, got: {port}"
        )));
    }

    Ok(())
}

/// Validates the nickname.
fn validate_nick(nick: &str) -> ConfigResult<()> {
    if nick.is_empty() {
        return Err(ConfigError::missing_field("nick"));
    }

    if nick.contains(' ') {
        return Err(ConfigError::validation("Nickname cannot contain spaces"));
    }

    Ok(())
}

/// Validates the channel list.
fn validate_channels(channels: &[String]) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for channel in channels {
        if channel.is_empty() {
            return Err(ConfigError::missing_field("channels[]"));
        }

        if channel.contains(' ') || channel.contains(',') {
            return Err(ConfigError::validation(format!(
                "Channel name cannot contain spaces or commas: {channel}"
            )));
        }

        // Channel names are case-insensitive on the wire.
        if !seen.insert(channel.to_ascii_lowercase()) {
            return Err(ConfigError::DuplicateChannel(channel.clone()));
        }
    }

    Ok(())
}
