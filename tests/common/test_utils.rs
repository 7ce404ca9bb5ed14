use aquapure_rust::config::{Config, PredictorConfig};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sample request body within every physical range
pub fn sample_request_body() -> Value {
    json!({
        "ph": 7.2,
        "turbidity": 3.5,
        "temperature": 22.0,
        "tds": 420.0
    })
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a shell script that stands in for the predictor
pub fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
    path
}

/// Predictor config that runs `sh <script> <payload>`
pub fn sh_predictor(script: &Path) -> PredictorConfig {
    PredictorConfig {
        command: "sh".to_string(),
        script: Some(script.to_string_lossy().to_string()),
        ..PredictorConfig::default()
    }
}

/// Create a test configuration with sensible defaults
pub fn create_test_config(predictor: PredictorConfig) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.logs.level = "debug".to_string();
    config.predictor = predictor;
    config
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  logs:
    level: "debug"
  cors:
    allowed_origins:
      - "http://localhost:5173"

predictor:
  command: "/opt/ml/venv/bin/python"
  args: ["-u"]
  script: "/opt/ml/predictor.py"
  working_dir: "/opt/ml"
  env:
    OMP_NUM_THREADS: "1"
"#;

/// Configuration relying on defaults for everything but the port
pub const MINIMAL_CONFIG_YAML: &str = r#"
server:
  port: 9000
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;
