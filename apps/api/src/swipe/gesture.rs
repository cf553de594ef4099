//! Drag gesture tracker: turns pointer movement into a card position and a
//! release position into a swipe outcome.
//!
//! Coordinates are viewport pixels with the origin at the top-left corner.
//! `position` is the card's top-left corner. While dragging, the card is kept
//! centered under the pointer.
//!
//! Release rule:
//! - `x <= left_threshold` → commit left
//! - `x >= viewport.width - right_threshold - card_width` → commit right
//! - otherwise the card snaps back to its initial centered position

use serde::{Deserialize, Serialize};

use crate::models::Direction;

pub const CARD_WIDTH_PX: f64 = 600.0;
pub const CARD_HEIGHT_PX: f64 = 800.0;
pub const LEFT_THRESHOLD_PX: f64 = 200.0;
pub const RIGHT_THRESHOLD_PX: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub card_width: f64,
    pub card_height: f64,
    pub left_threshold: f64,
    pub right_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            card_width: CARD_WIDTH_PX,
            card_height: CARD_HEIGHT_PX,
            left_threshold: LEFT_THRESHOLD_PX,
            right_threshold: RIGHT_THRESHOLD_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Committed(Direction),
    Reverted,
}

/// Per-card drag state.
#[derive(Debug, Clone)]
pub struct DragTracker {
    config: GestureConfig,
    viewport: Viewport,
    position: Point,
    dragging: bool,
}

impl DragTracker {
    pub fn new(viewport: Viewport, config: GestureConfig) -> Self {
        let mut tracker = Self {
            config,
            viewport,
            position: Point { x: 0.0, y: 0.0 },
            dragging: false,
        };
        tracker.position = tracker.initial_position();
        tracker
    }

    /// Card centered in the current viewport.
    pub fn initial_position(&self) -> Point {
        Point {
            x: self.viewport.width / 2.0 - self.config.card_width / 2.0,
            y: self.viewport.height / 2.0 - self.config.card_height / 2.0,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Records the new viewport. The card re-centers only when idle.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if !self.dragging {
            self.position = self.initial_position();
        }
    }

    /// Starts a drag. Returns `false` if a drag was already in progress.
    pub fn pointer_down(&mut self) -> bool {
        if self.dragging {
            return false;
        }
        self.dragging = true;
        true
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if !self.dragging {
            return;
        }
        self.position = Point {
            x: pointer.x - self.config.card_width / 2.0,
            y: pointer.y - self.config.card_height / 2.0,
        };
    }

    /// Ends the drag and applies the release rule. `None` if not dragging.
    pub fn pointer_up(&mut self) -> Option<SwipeOutcome> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        let x = self.position.x;
        let right_edge =
            self.viewport.width - self.config.right_threshold - self.config.card_width;

        if x <= self.config.left_threshold {
            Some(SwipeOutcome::Committed(Direction::Left))
        } else if x >= right_edge {
            Some(SwipeOutcome::Committed(Direction::Right))
        } else {
            self.snap_back();
            Some(SwipeOutcome::Reverted)
        }
    }

    /// Returns an idle card to its initial position.
    pub fn snap_back(&mut self) {
        if !self.dragging {
            self.position = self.initial_position();
        }
    }
}
