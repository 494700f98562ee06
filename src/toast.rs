//! Short-lived notifications shown over the current screen

use std::time::{Duration, Instant};

/// How long a toast stays up without a key press
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    raised_at: Instant,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            raised_at: Instant::now(),
        }
    }

    /// Notice for an action the marketplace does not support yet
    pub fn coming_soon(feature: &str) -> Self {
        Self::new(
            "🚧 Feature in progress",
            format!("{} will be available soon!", feature),
        )
    }

    /// Whether the toast has outlived its display time at `now`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= TOAST_TTL
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
