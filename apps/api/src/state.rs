use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::ingest::IngestionPipeline;
use crate::swipe::SwipeSession;
use crate::triage::CoordinatorHandle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owner of the card queue and decision log.
    pub triage: CoordinatorHandle,
    /// Drag trackers and feedback for the swipe view. One event at a time.
    pub swipe: Arc<Mutex<SwipeSession>>,
    pub ingest: Arc<IngestionPipeline>,
    pub config: Config,
}
