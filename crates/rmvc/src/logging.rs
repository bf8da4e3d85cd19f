//! Subscriber setup for applications embedding the router

use anyhow::{Context, Result};
use tracing::Level;

use crate::config::LoggingConfig;

/// Parses a level name such as `info` or `DEBUG`
pub fn parse_level(level: &str) -> Result<Level> {
    level
        .trim()
        .parse::<Level>()
        .with_context(|| format!("Invalid log level: {:?}", level))
}

/// Installs a global fmt subscriber at `level`
///
/// Returns `Ok(false)` when a global subscriber was already installed, so
/// calling this more than once is harmless.
pub fn init(level: &str) -> Result<bool> {
    let level = parse_level(level)?;

    Ok(tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .is_ok())
}

/// [`init`] with the level from the `[logging]` section
pub fn init_from_config(config: &LoggingConfig) -> Result<bool> {
    init(&config.level)
}
