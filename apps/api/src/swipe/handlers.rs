//! Axum route handlers for the swipe view.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::models::Decision;
use crate::state::AppState;
use crate::swipe::gesture::Viewport;
use crate::swipe::session::{PointerEvent, SessionSnapshot};

#[derive(Debug, Deserialize)]
pub struct ResizeRequest {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Serialize)]
pub struct PointerResponse {
    /// Decisions recorded as a result of this event.
    pub committed: Vec<Decision>,
    pub session: SessionSnapshot,
}

/// GET /api/v1/swipe
pub async fn handle_get_session(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.swipe.lock().await;
    let queue = state.triage.queue().await?;
    session.sync_cards(&queue);
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/swipe/viewport
pub async fn handle_resize(
    State(state): State<AppState>,
    Json(request): Json<ResizeRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(request.width) || !valid(request.height) {
        return Err(AppError::Validation(
            "viewport width and height must be positive".to_string(),
        ));
    }

    let mut session = state.swipe.lock().await;
    let queue = state.triage.queue().await?;
    session.sync_cards(&queue);
    session.resize(Viewport {
        width: request.width,
        height: request.height,
    });
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/swipe/pointer
///
/// Feeds one pointer event to the session. Commits are applied through the
/// triage coordinator while the session lock is held, so events are handled
/// strictly in order. Feedback is shown only for recorded decisions; a swipe
/// the coordinator rejects snaps back and its error is returned.
pub async fn handle_pointer(
    State(state): State<AppState>,
    Json(event): Json<PointerEvent>,
) -> Result<Json<PointerResponse>, AppError> {
    let mut session = state.swipe.lock().await;
    let queue = state.triage.queue().await?;
    session.sync_cards(&queue);

    let swiped = session.handle_pointer(event)?;

    let mut committed = Vec::with_capacity(swiped.len());
    let mut failure = None;
    for decision in swiped {
        let Some(card_id) = decision.card_id else {
            continue;
        };
        match state.triage.decide(card_id, decision.direction).await {
            Ok(recorded) => {
                session.show_commit(recorded.direction);
                committed.push(recorded);
            }
            Err(e) => {
                warn!("Swipe on card {card_id} was not recorded: {e}");
                session.revert_commit(card_id);
                failure.get_or_insert(e);
            }
        }
    }

    if !committed.is_empty() {
        let queue = state.triage.queue().await?;
        session.sync_cards(&queue);
    }

    if let Some(e) = failure {
        return Err(e.into());
    }

    Ok(Json(PointerResponse {
        committed,
        session: session.snapshot(),
    }))
}
