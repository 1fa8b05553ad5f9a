use crate::api::models::AppState;
use crate::api::review::handlers::submit_review_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(submit_review_handler))
}
