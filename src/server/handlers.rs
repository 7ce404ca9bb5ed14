use super::types::ErrorResponse;
use crate::{
    Error,
    predictor::{INVALID_OUTPUT_MESSAGE, PredictionRequest, PredictionResult, RelayFailure, Scorer},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const ROOT_MESSAGE: &str = "Backend is running successfully";
pub const PREDICT_PROBE_MESSAGE: &str = "Model is running successfully";
pub const START_FAILURE_MESSAGE: &str = "Failed to start ML model";
pub const NOT_AN_OBJECT_MESSAGE: &str = "Request body must be a JSON object";

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<dyn Scorer>,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

pub async fn predict_probe() -> &'static str {
    PREDICT_PROBE_MESSAGE
}

pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ErrorReply> {
    let request_id = Uuid::new_v4();

    let Json(payload) = body.map_err(|rejection| {
        warn!(
            "Rejected prediction request {}: {}",
            request_id,
            rejection.body_text()
        );
        (
            rejection.status(),
            Json(ErrorResponse::new(rejection.body_text())),
        )
    })?;

    if !payload.is_object() {
        warn!("Prediction request {} is not a JSON object", request_id);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(NOT_AN_OBJECT_MESSAGE)),
        ));
    }

    info!("Received prediction request {}: {}", request_id, payload);
    log_sample(request_id, &payload);

    let output = state.scorer.score(&payload).await.map_err(|e| {
        error!("Failed to run predictor for request {}: {}", request_id, e);
        internal_error(ErrorResponse::new(format!(
            "{}: {}",
            START_FAILURE_MESSAGE,
            failure_reason(&e)
        )))
    })?;

    if output.exit_code != Some(0) {
        warn!(
            "Predictor for request {} exited with code {:?}",
            request_id, output.exit_code
        );
    }

    match output.interpret() {
        Ok(value) => {
            log_classification(request_id, &value);
            Ok(Json(value))
        }
        Err(RelayFailure::ScorerError(stderr)) => {
            error!("Python error for request {}: {}", request_id, stderr);
            Err(internal_error(ErrorResponse::new(stderr)))
        }
        Err(RelayFailure::InvalidOutput { raw }) => {
            error!(
                "Predictor returned non-JSON output for request {}: {}",
                request_id, raw
            );
            Err(internal_error(ErrorResponse::with_raw(
                INVALID_OUTPUT_MESSAGE,
                raw,
            )))
        }
    }
}

fn internal_error(body: ErrorResponse) -> ErrorReply {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
}

// Scorer errors already carry their own context
fn failure_reason(error: &Error) -> String {
    match error {
        Error::Scorer(reason) => reason.clone(),
        other => other.to_string(),
    }
}

/// Warns about implausible readings; the payload is forwarded regardless.
fn log_sample(request_id: Uuid, payload: &Value) {
    match serde_json::from_value::<PredictionRequest>(payload.clone()) {
        Ok(sample) => {
            let out_of_range = sample.out_of_range();
            if !out_of_range.is_empty() {
                warn!(
                    "Prediction request {} has out-of-range fields: {}",
                    request_id,
                    out_of_range.join(", ")
                );
            }
        }
        Err(e) => warn!(
            "Prediction request {} is not a complete numeric sample: {}",
            request_id, e
        ),
    }
}

fn log_classification(request_id: Uuid, value: &Value) {
    match serde_json::from_value::<PredictionResult>(value.clone()) {
        Ok(result) => {
            let assessment = result.assessment();
            info!(
                "Prediction {} classified as {} ({}): {}",
                request_id,
                result.wqi_class,
                assessment,
                assessment.description()
            );
            if let Some(expected) = result.index_mismatch() {
                warn!(
                    "Prediction {} has class_index {:?} ({}) but wqi_class {}",
                    request_id, result.class_index, expected, result.wqi_class
                );
            }
        }
        Err(_) => warn!(
            "Prediction {} returned JSON without a wqi_class: {}",
            request_id, value
        ),
    }
}
