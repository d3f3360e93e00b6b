//! Notification toast and transient invalid-input flags.
//!
//! Both surfaces take the current time as a parameter instead of
//! reading a clock, which keeps expiry deterministic under test; the
//! host passes its monotonic elapsed time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use vigil_core::VitalField;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Neutral information
    Info,
    /// Degraded but operational
    Warning,
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Display text
    pub message: String,
    /// Severity
    pub kind: NoticeKind,
}

impl Notice {
    /// Build a notice.
    #[must_use]
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// Single-slot notification surface: at most one notice is visible and
/// a new one supersedes the old.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    current: Option<(Notice, Duration)>,
}

impl Toast {
    /// How long a notice stays visible.
    pub const DISPLAY_WINDOW: Duration = Duration::from_secs(3);

    /// Create an empty toast.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice at time `now`, superseding any visible one.
    pub fn show(&mut self, notice: Notice, now: Duration) {
        self.current = Some((notice, now));
    }

    /// The notice visible at time `now`, if its window has not passed.
    #[must_use]
    pub fn visible(&self, now: Duration) -> Option<&Notice> {
        match &self.current {
            Some((notice, shown_at))
                if now.saturating_sub(*shown_at) < Self::DISPLAY_WINDOW =>
            {
                Some(notice)
            }
            _ => None,
        }
    }

    /// Drop the current notice immediately.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Transient invalid-input markers, one per originating field.
///
/// A rejected manual edit flags its field; the flag auto-clears after
/// a fixed short delay.
#[derive(Debug, Clone, Default)]
pub struct InvalidFlags {
    raised: HashMap<VitalField, Duration>,
}

impl InvalidFlags {
    /// How long a flag stays raised.
    pub const FLAG_WINDOW: Duration = Duration::from_secs(2);

    /// Create with no flags raised.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag on a field at time `now`.
    pub fn raise(&mut self, field: VitalField, now: Duration) {
        self.raised.insert(field, now);
    }

    /// Whether a field is currently flagged.
    #[must_use]
    pub fn is_flagged(&self, field: VitalField, now: Duration) -> bool {
        self.raised
            .get(&field)
            .is_some_and(|raised_at| now.saturating_sub(*raised_at) < Self::FLAG_WINDOW)
    }

    /// Drop every expired flag.
    pub fn sweep(&mut self, now: Duration) {
        self.raised
            .retain(|_, raised_at| now.saturating_sub(*raised_at) < Self::FLAG_WINDOW);
    }
}
