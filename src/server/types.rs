use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw: None,
        }
    }

    pub fn with_raw(error: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw: Some(raw.into()),
        }
    }
}
