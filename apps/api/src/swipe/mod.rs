// Swipe view: drag-to-classify gesture tracking and decision feedback.
// Holds no persisted state; commits are forwarded to the triage coordinator.

pub mod feedback;
pub mod gesture;
pub mod handlers;
pub mod session;

use thiserror::Error;

pub use gesture::{GestureConfig, Viewport};
pub use session::SwipeSession;

#[derive(Debug, Error)]
pub enum SwipeError {
    #[error("Card {0} is not on the swipe deck")]
    UnknownCard(i64),
}
