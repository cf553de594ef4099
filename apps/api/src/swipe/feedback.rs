//! Transient visual feedback shown after a swipe commit: a tinted full-viewport
//! overlay and an enlarged side indicator, both reverting after a fixed delay.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::models::Direction;

pub const FEEDBACK_DURATION: Duration = Duration::from_millis(500);

pub const OVERLAY_REJECT: &str = "rgba(255, 0, 0, 0.15)";
pub const OVERLAY_ACCEPT: &str = "rgba(0, 255, 0, 0.15)";

pub const INDICATOR_REST_PX: u32 = 75;
pub const INDICATOR_ACTIVE_PX: u32 = 100;

/// What the swipe view should render right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackState {
    pub overlay: Option<&'static str>,
    pub left_indicator_px: u32,
    pub right_indicator_px: u32,
}

#[derive(Debug, Clone)]
pub struct Feedback {
    duration: Duration,
    overlay: Option<(&'static str, Instant)>,
    left_until: Option<Instant>,
    right_until: Option<Instant>,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(FEEDBACK_DURATION)
    }
}

impl Feedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            overlay: None,
            left_until: None,
            right_until: None,
        }
    }

    pub fn trigger(&mut self, direction: Direction) {
        self.trigger_at(direction, Instant::now());
    }

    /// A newer commit replaces the overlay color; each side indicator keeps
    /// its own timer.
    pub fn trigger_at(&mut self, direction: Direction, now: Instant) {
        let until = now + self.duration;
        match direction {
            Direction::Left => {
                self.overlay = Some((OVERLAY_REJECT, until));
                self.left_until = Some(until);
            }
            Direction::Right => {
                self.overlay = Some((OVERLAY_ACCEPT, until));
                self.right_until = Some(until);
            }
        }
    }

    pub fn state(&self) -> FeedbackState {
        self.state_at(Instant::now())
    }

    pub fn state_at(&self, now: Instant) -> FeedbackState {
        let active = |until: Option<Instant>| until.is_some_and(|u| now < u);
        let indicator = |until| {
            if active(until) {
                INDICATOR_ACTIVE_PX
            } else {
                INDICATOR_REST_PX
            }
        };
        FeedbackState {
            overlay: self
                .overlay
                .filter(|(_, until)| now < *until)
                .map(|(color, _)| color),
            left_indicator_px: indicator(self.left_until),
            right_indicator_px: indicator(self.right_until),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_state() {
        let fb = Feedback::default();
        let state = fb.state_at(Instant::now());
        assert_eq!(state.overlay, None);
        assert_eq!(state.left_indicator_px, INDICATOR_REST_PX);
        assert_eq!(state.right_indicator_px, INDICATOR_REST_PX);
    }

    #[test]
    fn test_left_commit_shows_red_and_grows_left() {
        let mut fb = Feedback::default();
        let t0 = Instant::now();
        fb.trigger_at(Direction::Left, t0);
        let state = fb.state_at(t0 + Duration::from_millis(100));
        assert_eq!(state.overlay, Some(OVERLAY_REJECT));
        assert_eq!(state.left_indicator_px, INDICATOR_ACTIVE_PX);
        assert_eq!(state.right_indicator_px, INDICATOR_REST_PX);
    }

    #[test]
    fn test_reverts_after_duration() {
        let mut fb = Feedback::default();
        let t0 = Instant::now();
        fb.trigger_at(Direction::Right, t0);
        let state = fb.state_at(t0 + FEEDBACK_DURATION);
        assert_eq!(state.overlay, None);
        assert_eq!(state.right_indicator_px, INDICATOR_REST_PX);
    }

    #[test]
    fn test_later_commit_replaces_overlay_keeps_indicators() {
        let mut fb = Feedback::default();
        let t0 = Instant::now();
        fb.trigger_at(Direction::Left, t0);
        fb.trigger_at(Direction::Right, t0 + Duration::from_millis(200));

        let state = fb.state_at(t0 + Duration::from_millis(300));
        assert_eq!(state.overlay, Some(OVERLAY_ACCEPT));
        assert_eq!(state.left_indicator_px, INDICATOR_ACTIVE_PX);
        assert_eq!(state.right_indicator_px, INDICATOR_ACTIVE_PX);

        let state = fb.state_at(t0 + Duration::from_millis(600));
        assert_eq!(state.overlay, Some(OVERLAY_ACCEPT));
        assert_eq!(state.left_indicator_px, INDICATOR_REST_PX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reverts_on_tokio_clock() {
        let mut fb = Feedback::default();
        fb.trigger(Direction::Left);
        assert_eq!(fb.state().overlay, Some(OVERLAY_REJECT));

        tokio::time::advance(Duration::from_millis(499)).await;
        assert_eq!(fb.state().left_indicator_px, INDICATOR_ACTIVE_PX);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(fb.state().overlay, None);
        assert_eq!(fb.state().left_indicator_px, INDICATOR_REST_PX);
    }
}
