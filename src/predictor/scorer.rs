use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

pub const INVALID_OUTPUT_MESSAGE: &str = "Invalid response from ML model";

/// Runs one prediction and hands back whatever the scorer produced.
///
/// `payload` is the request body exactly as the client sent it.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, payload: &Value) -> Result<ScorerOutput>;
}

/// Everything a finished scorer run left behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScorerOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ScorerOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// Any stderr wins over stdout, then stdout must be JSON.
    pub fn interpret(self) -> std::result::Result<Value, RelayFailure> {
        if !self.stderr.is_empty() {
            return Err(RelayFailure::ScorerError(self.stderr));
        }

        serde_json::from_str(&self.stdout).map_err(|_| RelayFailure::InvalidOutput {
            raw: self.stdout,
        })
    }
}

/// A scorer run that finished but cannot be relayed as a success.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayFailure {
    ScorerError(String),
    InvalidOutput { raw: String },
}

impl fmt::Display for RelayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScorerError(stderr) => write!(f, "{}", stderr),
            Self::InvalidOutput { .. } => f.write_str(INVALID_OUTPUT_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_stdout_is_parsed() {
        let output = ScorerOutput::success(r#"{"wqi_class": "Excellent"}"#);
        assert_eq!(output.interpret(), Ok(json!({"wqi_class": "Excellent"})));
    }

    #[test]
    fn test_trailing_newline_is_accepted() {
        let output = ScorerOutput::success("{\"wqi_class\": \"Poor\"}\n");
        assert_eq!(output.interpret(), Ok(json!({"wqi_class": "Poor"})));
    }

    #[test]
    fn test_stderr_wins_over_valid_stdout() {
        let output = ScorerOutput {
            stdout: r#"{"wqi_class": "Good"}"#.to_string(),
            stderr: "Traceback: boom".to_string(),
            exit_code: Some(0),
        };
        assert_eq!(
            output.interpret(),
            Err(RelayFailure::ScorerError("Traceback: boom".to_string()))
        );
    }

    #[test]
    fn test_non_json_stdout_keeps_raw_text() {
        let output = ScorerOutput::success("not json at all\n");
        let failure = output.interpret().unwrap_err();
        assert_eq!(failure.to_string(), INVALID_OUTPUT_MESSAGE);
        assert_eq!(
            failure,
            RelayFailure::InvalidOutput {
                raw: "not json at all\n".to_string()
            }
        );
    }

    #[test]
    fn test_empty_stdout_is_invalid() {
        let output = ScorerOutput::success("");
        assert!(matches!(
            output.interpret(),
            Err(RelayFailure::InvalidOutput { raw }) if raw.is_empty()
        ));
    }

    #[test]
    fn test_exit_code_does_not_affect_outcome() {
        let output = ScorerOutput {
            stdout: r#"{"error": "No input data provided"}"#.to_string(),
            stderr: String::new(),
            exit_code: Some(1),
        };
        assert_eq!(
            output.interpret(),
            Ok(json!({"error": "No input data provided"}))
        );
    }
}
