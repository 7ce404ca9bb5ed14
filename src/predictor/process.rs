use super::{Scorer, ScorerOutput};
use crate::{config::PredictorConfig, Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Spawns the configured predictor once per request.
pub struct ProcessScorer {
    config: PredictorConfig,
}

impl ProcessScorer {
    pub fn new(config: PredictorConfig) -> Result<Self> {
        if config.command.trim().is_empty() {
            return Err(Error::config("predictor requires a non-empty command"));
        }

        Ok(Self { config })
    }

    /// Arguments passed before the payload.
    pub fn base_args(&self) -> Vec<String> {
        let mut args = self.config.args.clone();
        if let Some(script) = &self.config.script {
            args.push(script.clone());
        }
        args
    }

    fn build_command(&self, payload: &str) -> Command {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(self.base_args());
        cmd.arg(payload);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.config.env {
            cmd.env(key, value);
        }

        cmd
    }
}

#[async_trait]
impl Scorer for ProcessScorer {
    async fn score(&self, payload: &Value) -> Result<ScorerOutput> {
        let payload = serde_json::to_string(payload)?;

        debug!(
            "Spawning predictor: {} {:?} with payload {}",
            self.config.command,
            self.base_args(),
            payload
        );

        // Both pipes are drained concurrently until the child exits
        let output = self
            .build_command(&payload)
            .output()
            .await
            .map_err(|e| {
                Error::scorer(format!(
                    "Failed to spawn predictor process {}: {}",
                    self.config.command, e
                ))
            })?;

        Ok(ScorerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
