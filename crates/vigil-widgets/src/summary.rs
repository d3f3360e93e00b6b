//! Summary card with change-tracking refresh.

use crate::formats::format_reading;
use serde::{Deserialize, Serialize};
use vigil_core::{VitalField, VitalsRecord};

/// One line of the summary card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Displayed field
    pub field: VitalField,
    /// Current formatted text
    pub text: String,
}

/// The all-fields summary card.
///
/// Refresh only rewrites an entry when its formatted string actually
/// changed; `redraws()` counts rewrites so hosts (and tests) can
/// observe that unchanged fields cost nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryCard {
    entries: Vec<SummaryEntry>,
    redraws: u64,
}

impl Default for SummaryCard {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryCard {
    /// Create a card listing every field, in display order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VitalField::ALL
                .iter()
                .map(|&field| SummaryEntry {
                    field,
                    text: String::new(),
                })
                .collect(),
            redraws: 0,
        }
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    /// Current text for one field.
    #[must_use]
    pub fn text(&self, field: VitalField) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.text.as_str())
    }

    /// Total entry rewrites since creation.
    #[must_use]
    pub const fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Refresh from the current record, touching only changed entries.
    pub fn refresh(&mut self, record: &VitalsRecord) {
        for entry in &mut self.entries {
            let text = format_reading(entry.field, record.get(entry.field));
            if entry.text != text {
                entry.text = text;
                self.redraws += 1;
            }
        }
    }
}
