//! Bounded gauge display.

use serde::{Deserialize, Serialize};
use vigil_core::VitalField;

/// Display model for a dial/bar gauge over a fixed display span.
///
/// The stored value is never clamped; only the fill fraction is, so a
/// reading outside the display span pins the needle without losing
/// the number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gauge {
    field: VitalField,
    value: f64,
    min: f64,
    max: f64,
    label: Option<String>,
}

impl Gauge {
    /// Create a gauge over a display span.
    #[must_use]
    pub fn new(field: VitalField, min: f64, max: f64) -> Self {
        Self {
            field,
            value: min,
            min,
            max,
            label: None,
        }
    }

    /// Set a custom label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The field this gauge displays.
    #[must_use]
    pub const fn field(&self) -> VitalField {
        self.field
    }

    /// Current raw value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Label text (field label when none was set).
    #[must_use]
    pub fn label_text(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.field.label())
    }

    /// Fill fraction in [0, 1].
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Refresh from the current value.
    pub fn refresh(&mut self, value: f64) {
        self.value = value;
    }
}
