//! Range validation for candidate readings.
//!
//! Validation *rejects*: a failing value leaves the store untouched.
//! Clamping happens only inside the simulator's perturbation step and
//! never on the manual or backend paths.

use crate::field::VitalField;
use std::fmt;

/// Outcome of validating a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Validation passed.
    Valid,
    /// Validation failed with an error message.
    Invalid(String),
}

impl ValidationResult {
    /// Check if validation passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Get the error message if invalid.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(msg) => Some(msg),
            Self::Valid => None,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

/// Check a value against inclusive bounds.
///
/// Non-finite values are always rejected. A `None` bound disables that
/// side of the check, so `in_range(v, None, None)` accepts any finite
/// value (used for composite inputs whose parts are validated
/// independently).
#[must_use]
pub fn in_range(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    if !value.is_finite() {
        return false;
    }
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}

/// Validate a value against a field's accept range.
#[must_use]
pub fn check(field: VitalField, value: f64) -> ValidationResult {
    let (min, max) = match field.accepted_range() {
        Some(range) => (Some(range.min), Some(range.max)),
        None => (None, None),
    };
    if in_range(value, min, max) {
        ValidationResult::Valid
    } else if let Some(range) = field.accepted_range() {
        ValidationResult::Invalid(format!(
            "{} must be between {} and {} {}",
            field.label(),
            range.min,
            range.max,
            field.unit()
        ))
    } else {
        ValidationResult::Invalid(format!("{} must be a finite number", field.label()))
    }
}
