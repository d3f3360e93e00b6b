//! Per-field status badge.

use crate::formats::format_reading;
use serde::{Deserialize, Serialize};
use vigil_core::{status, VitalField, VitalStatus};

/// Display model for one field's reading and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBadge {
    field: VitalField,
    text: String,
    status: VitalStatus,
}

impl StatusBadge {
    /// Create a badge for a field with empty text and stable status.
    #[must_use]
    pub fn new(field: VitalField) -> Self {
        Self {
            field,
            text: String::new(),
            status: VitalStatus::Stable,
        }
    }

    /// The field this badge displays.
    #[must_use]
    pub const fn field(&self) -> VitalField {
        self.field
    }

    /// Formatted reading, e.g. "72 beats/min".
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Classified status of the displayed value.
    #[must_use]
    pub const fn status(&self) -> VitalStatus {
        self.status
    }

    /// CSS class for the host to apply ("stable", "warning", "critical").
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        self.status.css_class()
    }

    /// Refresh text and status from the current value.
    pub fn refresh(&mut self, value: f64) {
        self.text = format_reading(self.field, value);
        self.status = status::classify(self.field, value);
    }
}
