use aquapure_rust::{
    Error, Result,
    predictor::{Scorer, ScorerOutput},
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Mock scorer that replays a fixed output and records every request
#[derive(Debug, Default)]
pub struct MockScorer {
    pub output: ScorerOutput,
    pub requests: Arc<Mutex<Vec<Value>>>,
    pub error: Option<String>,
}

impl MockScorer {
    pub fn new(output: ScorerOutput) -> Self {
        Self {
            output,
            ..Self::default()
        }
    }

    pub fn with_stdout(stdout: &str) -> Self {
        Self::new(ScorerOutput::success(stdout))
    }

    pub fn with_stderr(stdout: &str, stderr: &str) -> Self {
        Self::new(ScorerOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: Some(1),
        })
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scorer for MockScorer {
    async fn score(&self, payload: &Value) -> Result<ScorerOutput> {
        self.requests.lock().unwrap().push(payload.clone());

        if let Some(ref error) = self.error {
            return Err(Error::scorer(error.clone()));
        }

        Ok(self.output.clone())
    }
}

/// Mock scorer whose stdout depends on the request, for telling concurrent
/// responses apart
#[derive(Debug, Default)]
pub struct EchoScorer;

#[async_trait]
impl Scorer for EchoScorer {
    async fn score(&self, payload: &Value) -> Result<ScorerOutput> {
        tokio::task::yield_now().await;
        Ok(ScorerOutput::success(format!(
            r#"{{"wqi_class": "Good", "echo_ph": {}}}"#,
            payload["ph"]
        )))
    }
}
