//! Manual input reconciliation.
//!
//! User-typed values arrive as raw strings. The reconciler parses,
//! validates against the field's accept range, and commits only on
//! success; a rejected value leaves the store exactly as it was. Blood
//! pressure is a pair: systolic and diastolic validate independently
//! but commit together or not at all, and the bulk form is
//! all-or-nothing across every clinical field.

use crate::field::VitalField;
use crate::store::VitalsStore;
use crate::validate;
use std::fmt;

/// Why a manual value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The raw string did not parse as a finite number.
    NotANumber {
        /// Originating field
        field: VitalField,
    },
    /// The parsed value is outside the field's accept range.
    OutOfRange {
        /// Originating field
        field: VitalField,
        /// Human-readable validation message
        message: String,
    },
}

impl InputError {
    /// The field the rejected input belongs to, for the transient
    /// invalid-input flag.
    #[must_use]
    pub const fn field(&self) -> VitalField {
        match self {
            Self::NotANumber { field } | Self::OutOfRange { field, .. } => *field,
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber { field } => {
                write!(f, "{} requires a numeric value", field.label())
            }
            Self::OutOfRange { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for InputError {}

/// Aggregate failure of the bulk form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkError {
    /// Every failing field's error, in form order.
    pub errors: Vec<InputError>,
}

impl fmt::Display for BulkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation: ", self.errors.len())?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BulkError {}

/// A successful single-field commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied {
    /// Committed field
    pub field: VitalField,
    /// Committed value
    pub value: f64,
}

impl Applied {
    /// Success notification text, e.g. "Heart rate set to 85 beats/min".
    #[must_use]
    pub fn notice(&self) -> String {
        format!("{} set to {} {}", self.field.label(), self.value, self.field.unit())
    }
}

/// A successful blood-pressure pair commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedPair {
    /// Committed systolic value
    pub systolic: f64,
    /// Committed diastolic value
    pub diastolic: f64,
}

impl AppliedPair {
    /// Success notification text.
    #[must_use]
    pub fn notice(&self) -> String {
        format!("Blood pressure set to {}/{} mmHg", self.systolic, self.diastolic)
    }
}

/// Raw strings from the bulk manual form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualForm {
    /// Heart rate input
    pub heart_rate: String,
    /// SpO2 input
    pub spo2: String,
    /// Body temperature input
    pub temperature: String,
    /// Systolic input
    pub systolic: String,
    /// Diastolic input
    pub diastolic: String,
}

impl ManualForm {
    fn entries(&self) -> [(VitalField, &str); 5] {
        [
            (VitalField::HeartRate, self.heart_rate.as_str()),
            (VitalField::Spo2, self.spo2.as_str()),
            (VitalField::Temperature, self.temperature.as_str()),
            (VitalField::Systolic, self.systolic.as_str()),
            (VitalField::Diastolic, self.diastolic.as_str()),
        ]
    }
}

/// Parse and validate one raw input without committing it.
fn screen(field: VitalField, raw: &str) -> Result<f64, InputError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| InputError::NotANumber { field })?;
    if !value.is_finite() {
        return Err(InputError::NotANumber { field });
    }
    match validate::check(field, value) {
        validate::ValidationResult::Valid => Ok(value),
        validate::ValidationResult::Invalid(message) => {
            Err(InputError::OutOfRange { field, message })
        }
    }
}

/// Apply one manually entered value.
///
/// On success the value is committed and an [`Applied`] describing the
/// notification is returned; on failure the store is untouched.
///
/// Blood pressure must go through [`apply_blood_pressure`] so the pair
/// invariant holds; single systolic/diastolic edits are still accepted
/// here for completeness but validate exactly like the pair halves.
pub fn apply_vital(
    store: &mut VitalsStore,
    field: VitalField,
    raw: &str,
) -> Result<Applied, InputError> {
    let value = screen(field, raw)?;
    store.commit(field, value);
    Ok(Applied { field, value })
}

/// Apply a manually entered blood-pressure pair.
///
/// Both halves are validated independently; if either fails, neither
/// commits.
pub fn apply_blood_pressure(
    store: &mut VitalsStore,
    systolic_raw: &str,
    diastolic_raw: &str,
) -> Result<AppliedPair, InputError> {
    let systolic = screen(VitalField::Systolic, systolic_raw)?;
    let diastolic = screen(VitalField::Diastolic, diastolic_raw)?;
    store.commit_all(&[
        (VitalField::Systolic, systolic),
        (VitalField::Diastolic, diastolic),
    ]);
    Ok(AppliedPair { systolic, diastolic })
}

/// Apply the bulk form: every field validates first, and one failure
/// means nothing commits.
pub fn apply_all(store: &mut VitalsStore, form: &ManualForm) -> Result<Vec<Applied>, BulkError> {
    let mut accepted = Vec::with_capacity(5);
    let mut errors = Vec::new();
    for (field, raw) in form.entries() {
        match screen(field, raw) {
            Ok(value) => accepted.push((field, value)),
            Err(err) => errors.push(err),
        }
    }
    if !errors.is_empty() {
        return Err(BulkError { errors });
    }
    store.commit_all(&accepted);
    Ok(accepted
        .into_iter()
        .map(|(field, value)| Applied { field, value })
        .collect())
}
