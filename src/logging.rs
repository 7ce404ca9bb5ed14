use crate::{Error, Result};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Builds the subscriber filter. `RUST_LOG` directives take precedence over
/// the single level from the config file.
pub fn env_filter(rust_log: Option<&str>, config_level: &str) -> Result<EnvFilter> {
    if let Some(directives) = rust_log {
        return EnvFilter::try_new(directives)
            .map_err(|e| Error::config(format!("Invalid RUST_LOG '{}': {}", directives, e)));
    }

    config_level.parse::<LevelFilter>().map_err(|_| {
        Error::config(format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            config_level
        ))
    })?;

    EnvFilter::try_new(config_level)
        .map_err(|e| Error::config(format!("Invalid log level '{}': {}", config_level, e)))
}
