pub mod models;
pub mod review;

// Re-exports
pub use models::*;

use axum::{extract::DefaultBodyLimit, http::Method, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router around an injected state
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .merge(review::routes())
        .with_state(state)
        // Reviews of any size are accepted
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
