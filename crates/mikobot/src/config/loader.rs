//! Configuration loading using figment.
//!
//! Sources, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. The JSON configuration file
//! 3. Environment variables (`MIKOBOT_*`, `__` as nesting separator)
//!
//! # Environment Variable Mapping
//!
//! - `MIKOBOT_NICK=miko` → `nick = "miko"`
//! - `MIKOBOT_BEHAVIOR__MEOW_HIGH=5` → `behavior.meow_high = 5`

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};

use super::error::{ConfigError, ConfigResult};
use super::schema::BotConfig;

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "MIKOBOT_";

/// Loads and returns the configuration, unvalidated.
///
/// The file must exist; a missing path is reported as its own error
/// rather than silently falling back to defaults. Semantic checks are
/// a separate step, [`validate_config`](super::validate_config), run
/// by the caller once logging is installed.
pub fn load_config(path: &Path) -> ConfigResult<BotConfig> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    Figment::from(Serialized::defaults(BotConfig::default()))
        .merge(Json::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::LoadError(e.to_string()))
}
