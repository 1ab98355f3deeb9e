//! One clear control, two gestures: a click deletes one character, a double click
//! clears everything.
//!
//! Clicks are reported the way a browser reports them: click, click, double
//! click. The first click of a double click has already deleted a character by
//! the time the second one arrives; that delete is not undone.
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearAction {
    DeleteOne,
    ClearAll,
}

#[derive(Debug, Clone)]
pub struct ClearGesture {
    window: Duration,
    last_click: Option<Instant>,
}

impl ClearGesture {
    pub fn new(window: Duration) -> Self {
        ClearGesture {
            window,
            last_click: None,
        }
    }

    pub fn press(&mut self, now: Instant) -> ClearAction {
        let double = self
            .last_click
            .is_some_and(|previous| now.saturating_duration_since(previous) <= self.window);
        if double {
            // a third quick click starts a new pair
            self.last_click = None;
            ClearAction::ClearAll
        } else {
            self.last_click = Some(now);
            ClearAction::DeleteOne
        }
    }
}
