//! Configuration module for the bot.
//!
//! A JSON file plus `MIKOBOT_*` environment overrides. Loading and
//! validation are separate steps so validation diagnostics can go
//! through the logging layer. The loaded value is immutable for the
//! life of the process.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
pub use schema::{BehaviorConfig, BotConfig};
pub use validation::validate_config;
