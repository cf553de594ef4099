pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ingest::handlers as ingest;
use crate::state::AppState;
use crate::swipe::handlers as swipe;
use crate::triage::handlers as triage;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Queue / swipe view
        .route("/api/v1/queue", get(triage::handle_get_queue))
        .route("/api/v1/swipe", get(swipe::handle_get_session))
        .route("/api/v1/swipe/viewport", post(swipe::handle_resize))
        .route("/api/v1/swipe/pointer", post(swipe::handle_pointer))
        // Decision log view
        .route(
            "/api/v1/decisions",
            get(triage::handle_get_decisions).post(triage::handle_decide),
        )
        // Upload view
        .route(
            "/api/v1/uploads",
            post(ingest::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
