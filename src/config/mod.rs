mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config = parse(&config_str)?;
    apply_env_overrides(&mut config, |key| env::var(key).ok());

    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty file deserializes to null rather than an empty mapping
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(config_str)?;
    Ok(config)
}

/// Applies `PREDICTOR_COMMAND` and `PREDICTOR_SCRIPT` on top of the file values.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(command) = lookup("PREDICTOR_COMMAND") {
        debug!("PREDICTOR_COMMAND overrides predictor command: {}", command);
        config.predictor.command = command;
    }

    if let Some(script) = lookup("PREDICTOR_SCRIPT") {
        debug!("PREDICTOR_SCRIPT overrides predictor script: {}", script);
        config.predictor.script = Some(script);
    }
}
