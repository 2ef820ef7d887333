//! Single-slot transient notice shown over the browser view.
//!
//! Setting a notice replaces whatever is currently visible and restamps
//! the clock, so the notice always hides a fixed interval after the
//! *last* set. There is no queue and no stacking.

use std::time::{Duration, Instant};

/// How long a notice stays visible after it was last set.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
pub struct Notice {
    current: Option<Entry>,
}

#[derive(Debug)]
struct Entry {
    text: String,
    shown_at: Instant,
}

impl Notice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.set_at(text, Instant::now());
    }

    fn set_at(&mut self, text: impl Into<String>, at: Instant) {
        self.current = Some(Entry {
            text: text.into(),
            shown_at: at,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|entry| entry.text.as_str())
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.current
            .as_ref()
            .is_some_and(|entry| now.duration_since(entry.shown_at) >= DISPLAY_DURATION)
    }

    /// Called from the periodic subscription while a notice is visible.
    pub fn tick(&mut self) {
        if self.is_expired_at(Instant::now()) {
            self.clear();
        }
    }
}
