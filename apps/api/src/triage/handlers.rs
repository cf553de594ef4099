//! Axum route handlers for the queue and decision-log views.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Card, Decision, Direction};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QueueResponse {
    pub cards: Vec<Card>,
}

/// Decision log split into the two columns of the decisions view.
#[derive(Debug, Serialize)]
pub struct DecisionsResponse {
    pub rejected: Vec<Decision>,
    pub accepted: Vec<Decision>,
}

impl DecisionsResponse {
    fn from_log(log: Vec<Decision>) -> Self {
        let (rejected, accepted) = log
            .into_iter()
            .partition(|d| d.direction == Direction::Left);
        Self { rejected, accepted }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecideRequest {
    pub card_id: i64,
    pub direction: Direction,
}

/// GET /api/v1/queue
pub async fn handle_get_queue(State(state): State<AppState>) -> Result<Json<QueueResponse>, AppError> {
    let cards = state.triage.queue().await?;
    Ok(Json(QueueResponse { cards }))
}

/// GET /api/v1/decisions
pub async fn handle_get_decisions(
    State(state): State<AppState>,
) -> Result<Json<DecisionsResponse>, AppError> {
    let log = state.triage.decisions().await?;
    Ok(Json(DecisionsResponse::from_log(log)))
}

/// POST /api/v1/decisions
///
/// Commits a decision without a drag gesture.
pub async fn handle_decide(
    State(state): State<AppState>,
    Json(request): Json<DecideRequest>,
) -> Result<Json<Decision>, AppError> {
    let decision = state.triage.decide(request.card_id, request.direction).await?;
    Ok(Json(decision))
}
