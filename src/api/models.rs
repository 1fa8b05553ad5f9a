use crate::storage::ReviewStore;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub review_store: Arc<ReviewStore>,
}

impl AppState {
    pub fn new(review_store: Arc<ReviewStore>) -> Self {
        Self { review_store }
    }
}

/// Request to submit a review
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct SubmitReviewRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub review: Option<String>,
}

/// Response after accepting a review
#[derive(Debug, Serialize)]
pub struct SubmitReviewResponse {
    pub status: String,
}

impl SubmitReviewResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Non-string values are treated as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

impl SubmitReviewRequest {
    /// Decode a raw body
    ///
    /// Only a JSON object sent with a JSON media type yields a review; any
    /// other body decodes to an empty request.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Self {
        if !content_type.is_some_and(is_json_content_type) {
            return Self::default();
        }

        // Structs also deserialize from sequences, so require an object first
        match serde_json::from_slice::<Value>(body) {
            Ok(object @ Value::Object(_)) => serde_json::from_value(object).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Validate the request
    /// Returns the trimmed review text
    pub fn validate(&self) -> Result<&str, AppError> {
        let text = self.review.as_deref().unwrap_or_default().trim();
        if text.is_empty() {
            return Err(AppError::EmptyReview);
        }
        Ok(text)
    }
}

/// `application/json` or any `application/*+json`, parameters ignored
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Empty review")]
    EmptyReview,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::EmptyReview => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse {
            error: self.to_string(),
        }))
        .into_response()
    }
}
