use crate::api::models::*;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, info};

pub async fn submit_review_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitReviewResponse>), AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let request = SubmitReviewRequest::from_body(content_type, &body);

    // Validate
    let text = request.validate().inspect_err(|e| {
        debug!(body_len = body.len(), content_type = ?content_type, error = %e, "Rejected review");
    })?;

    // Store
    let review_id = state.review_store.append(text.to_string()).await;

    info!(review_id, chars = text.chars().count(), "Review stored");

    Ok((StatusCode::CREATED, Json(SubmitReviewResponse::ok())))
}
