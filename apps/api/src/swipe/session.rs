//! Swipe session: one drag tracker per queued card plus the shared viewport
//! and decision feedback.
//!
//! Pointer-down targets a single card. Move and up events are global: they
//! reach every card whose drag is active, the way window-level listeners stay
//! registered for the lifetime of a drag. A card that leaves the queue drops
//! its tracker and with it any active drag.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::feedback::{Feedback, FeedbackState};
use super::gesture::{DragTracker, GestureConfig, Point, SwipeOutcome, Viewport};
use super::SwipeError;
use crate::models::{Card, Decision, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { card_id: i64 },
    Move { x: f64, y: f64 },
    Up,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub id: i64,
    pub text: String,
    pub position: Point,
    pub dragging: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub viewport: Viewport,
    pub cards: Vec<CardView>,
    pub feedback: FeedbackState,
}

struct TrackedCard {
    card: Card,
    tracker: DragTracker,
}

pub struct SwipeSession {
    config: GestureConfig,
    viewport: Viewport,
    cards: Vec<TrackedCard>,
    feedback: Feedback,
}

impl SwipeSession {
    pub fn new(viewport: Viewport, config: GestureConfig) -> Self {
        Self {
            config,
            viewport,
            cards: Vec::new(),
            feedback: Feedback::default(),
        }
    }

    /// Aligns trackers with the queue: new cards get a centered tracker,
    /// removed cards release theirs. Existing trackers keep their state.
    pub fn sync_cards(&mut self, queue: &[Card]) {
        let mut previous = std::mem::take(&mut self.cards);
        for card in queue {
            let tracked = match previous.iter().position(|t| t.card.id == card.id) {
                Some(idx) => previous.swap_remove(idx),
                None => TrackedCard {
                    card: card.clone(),
                    tracker: DragTracker::new(self.viewport, self.config),
                },
            };
            self.cards.push(tracked);
        }
        for released in previous {
            if released.tracker.is_dragging() {
                debug!("Card {} left the queue mid-drag", released.card.id);
            }
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for tracked in &mut self.cards {
            tracked.tracker.resize(viewport);
        }
    }

    /// Ids of cards with an active drag.
    pub fn active_drags(&self) -> Vec<i64> {
        self.cards
            .iter()
            .filter(|t| t.tracker.is_dragging())
            .map(|t| t.card.id)
            .collect()
    }

    /// Applies a pointer event and returns the swipes it committed.
    ///
    /// Committed cards stay at their drop position until the caller either
    /// confirms the decision with `show_commit` or undoes it with `revert_commit`.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Vec<Decision>, SwipeError> {
        match event {
            PointerEvent::Down { card_id } => {
                let tracked = self
                    .cards
                    .iter_mut()
                    .find(|t| t.card.id == card_id)
                    .ok_or(SwipeError::UnknownCard(card_id))?;
                if tracked.tracker.pointer_down() {
                    debug!("Drag started on card {card_id}");
                }
                Ok(Vec::new())
            }
            PointerEvent::Move { x, y } => {
                for tracked in &mut self.cards {
                    tracked.tracker.pointer_move(Point { x, y });
                }
                Ok(Vec::new())
            }
            PointerEvent::Up => {
                if self.active_drags().is_empty() {
                    return Ok(Vec::new());
                }
                let mut committed = Vec::new();
                for tracked in &mut self.cards {
                    match tracked.tracker.pointer_up() {
                        Some(SwipeOutcome::Committed(direction)) => {
                            debug!("Card {} swiped {direction}", tracked.card.id);
                            committed.push(Decision {
                                card_id: Some(tracked.card.id),
                                direction,
                                text: tracked.card.text.clone(),
                            });
                        }
                        Some(SwipeOutcome::Reverted) => {
                            debug!("Card {} snapped back", tracked.card.id);
                        }
                        None => {}
                    }
                }
                Ok(committed)
            }
        }
    }

    /// Shows commit feedback for a recorded decision.
    pub fn show_commit(&mut self, direction: Direction) {
        self.feedback.trigger(direction);
    }

    /// Snaps back a card whose swipe could not be recorded.
    pub fn revert_commit(&mut self, card_id: i64) {
        if let Some(tracked) = self.cards.iter_mut().find(|t| t.card.id == card_id) {
            tracked.tracker.snap_back();
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            viewport: self.viewport,
            cards: self
                .cards
                .iter()
                .map(|t| CardView {
                    id: t.card.id,
                    text: t.card.text.clone(),
                    position: t.tracker.position(),
                    dragging: t.tracker.is_dragging(),
                })
                .collect(),
            feedback: self.feedback.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::swipe::feedback::{OVERLAY_ACCEPT, OVERLAY_REJECT};

    fn session_with(cards: &[Card]) -> SwipeSession {
        let mut session = SwipeSession::new(
            Viewport {
                width: 1920.0,
                height: 1080.0,
            },
            GestureConfig::default(),
        );
        session.sync_cards(cards);
        session
    }

    fn drag_to(session: &mut SwipeSession, card_id: i64, x: f64) -> Vec<Decision> {
        session
            .handle_pointer(PointerEvent::Down { card_id })
            .unwrap();
        session
            .handle_pointer(PointerEvent::Move { x, y: 540.0 })
            .unwrap();
        session.handle_pointer(PointerEvent::Up).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_to_left_edge_emits_decision() {
        let mut session = session_with(&[Card::new(1, "Candidate A")]);

        // Pointer at x=300 puts the card's left edge at 0.
        let committed = drag_to(&mut session, 1, 300.0);

        assert_eq!(
            committed,
            vec![Decision {
                card_id: Some(1),
                direction: Direction::Left,
                text: "Candidate A".to_string(),
            }]
        );
        assert_eq!(session.snapshot().feedback.overlay, None);

        session.show_commit(Direction::Left);
        assert_eq!(session.snapshot().feedback.overlay, Some(OVERLAY_REJECT));

        tokio::time::advance(Duration::from_millis(500)).await;
        assert_eq!(session.snapshot().feedback.overlay, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_to_right_edge_emits_accept() {
        let mut session = session_with(&[Card::new(1, "A")]);
        let committed = drag_to(&mut session, 1, 1900.0);
        assert_eq!(committed[0].direction, Direction::Right);
        session.show_commit(Direction::Right);
        assert_eq!(session.snapshot().feedback.overlay, Some(OVERLAY_ACCEPT));
    }

    #[test]
    fn test_revert_commit_snaps_card_back_without_feedback() {
        let mut session = session_with(&[Card::new(1, "A")]);
        let committed = drag_to(&mut session, 1, 300.0);
        assert_eq!(committed.len(), 1);
        assert_eq!(session.snapshot().cards[0].position, Point { x: 0.0, y: 140.0 });

        session.revert_commit(1);

        let snap = session.snapshot();
        assert_eq!(snap.cards[0].position, Point { x: 660.0, y: 140.0 });
        assert!(!snap.cards[0].dragging);
        assert_eq!(snap.feedback.overlay, None);
        assert_eq!(snap.feedback.left_indicator_px, 75);
    }

    #[tokio::test]
    async fn test_ambiguous_drop_reverts_without_decision() {
        let mut session = session_with(&[Card::new(1, "A")]);
        let committed = drag_to(&mut session, 1, 900.0);
        assert!(committed.is_empty());
        let snap = session.snapshot();
        assert_eq!(snap.cards[0].position, Point { x: 660.0, y: 140.0 });
        assert_eq!(snap.feedback.overlay, None);
    }

    #[test]
    fn test_down_on_unknown_card_errors() {
        let mut session = session_with(&[Card::new(1, "A")]);
        let err = session
            .handle_pointer(PointerEvent::Down { card_id: 99 })
            .unwrap_err();
        assert!(matches!(err, SwipeError::UnknownCard(99)));
    }

    #[test]
    fn test_second_card_down_does_not_preempt_first() {
        let mut session = session_with(&[Card::new(1, "A"), Card::new(2, "B")]);
        session
            .handle_pointer(PointerEvent::Down { card_id: 1 })
            .unwrap();
        session
            .handle_pointer(PointerEvent::Down { card_id: 2 })
            .unwrap();
        assert_eq!(session.active_drags(), vec![1, 2]);
    }

    #[test]
    fn test_move_only_reaches_active_drags() {
        let mut session = session_with(&[Card::new(1, "A"), Card::new(2, "B")]);
        session
            .handle_pointer(PointerEvent::Down { card_id: 2 })
            .unwrap();
        session
            .handle_pointer(PointerEvent::Move { x: 1000.0, y: 600.0 })
            .unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.cards[0].position, Point { x: 660.0, y: 140.0 });
        assert_eq!(snap.cards[1].position, Point { x: 700.0, y: 200.0 });
    }

    #[test]
    fn test_up_without_drag_is_noop() {
        let mut session = session_with(&[Card::new(1, "A")]);
        assert!(session
            .handle_pointer(PointerEvent::Up)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_sync_releases_removed_cards_and_keeps_state() {
        let mut session = session_with(&[Card::new(1, "A"), Card::new(2, "B")]);
        session
            .handle_pointer(PointerEvent::Down { card_id: 1 })
            .unwrap();
        session
            .handle_pointer(PointerEvent::Down { card_id: 2 })
            .unwrap();

        session.sync_cards(&[Card::new(2, "B"), Card::new(3, "C")]);

        assert_eq!(session.active_drags(), vec![2]);
        let ids: Vec<_> = session.snapshot().cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_resize_recenters_idle_cards() {
        let mut session = session_with(&[Card::new(1, "A")]);
        session.resize(Viewport {
            width: 1280.0,
            height: 1000.0,
        });
        assert_eq!(
            session.snapshot().cards[0].position,
            Point { x: 340.0, y: 100.0 }
        );
    }

    #[test]
    fn test_pointer_event_wire_format() {
        let down: PointerEvent = serde_json::from_str(r#"{"type":"down","card_id":5}"#).unwrap();
        assert_eq!(down, PointerEvent::Down { card_id: 5 });
        let mv: PointerEvent = serde_json::from_str(r#"{"type":"move","x":1.5,"y":2}"#).unwrap();
        assert_eq!(mv, PointerEvent::Move { x: 1.5, y: 2.0 });
        let up: PointerEvent = serde_json::from_str(r#"{"type":"up"}"#).unwrap();
        assert_eq!(up, PointerEvent::Up);
    }
}
