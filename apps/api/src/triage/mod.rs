// Card queue and decision log, owned by a single coordinator task.

pub mod coordinator;
pub mod handlers;
pub mod queue;

use thiserror::Error;

use crate::store::StoreError;

pub use coordinator::{spawn_coordinator, CoordinatorHandle};

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Card {0} is not in the queue")]
    CardNotFound(i64),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Triage coordinator is not running")]
    Closed,
}
