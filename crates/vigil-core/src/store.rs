//! The owned vitals store.

use crate::field::VitalField;
use crate::record::VitalsRecord;
use serde::{Deserialize, Serialize};

/// Owner of the single [`VitalsRecord`].
///
/// The store is deliberately dumb: it does not re-validate. Validation
/// is the producer's contract, enforced at the reconciler and simulator
/// boundaries; the store guarantees atomicity of multi-field commits
/// and exact restoration on [`reset`](Self::reset).
///
/// Construct one per dashboard session. There is no process-wide
/// singleton; tests create as many independent stores as they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsStore {
    record: VitalsRecord,
    defaults: VitalsRecord,
    revision: u64,
}

impl Default for VitalsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalsStore {
    /// Create a store holding the documented default record.
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(VitalsRecord::default())
    }

    /// Create a store with injected defaults (used by tests and by
    /// hosts restoring a configured baseline).
    #[must_use]
    pub const fn with_defaults(defaults: VitalsRecord) -> Self {
        Self {
            record: defaults,
            defaults,
            revision: 0,
        }
    }

    /// Current readings.
    #[must_use]
    pub const fn record(&self) -> &VitalsRecord {
        &self.record
    }

    /// Copy of the current readings.
    #[must_use]
    pub const fn snapshot(&self) -> VitalsRecord {
        self.record
    }

    /// Read one field.
    #[must_use]
    pub const fn get(&self, field: VitalField) -> f64 {
        self.record.get(field)
    }

    /// Number of committed mutations since creation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Commit one pre-validated value.
    pub fn commit(&mut self, field: VitalField, value: f64) {
        self.record.put(field, value);
        self.revision += 1;
    }

    /// Commit several pre-validated values as one mutation.
    ///
    /// Used by the blood-pressure pair and the bulk manual path so a
    /// multi-field write is observed as a single revision step.
    pub fn commit_all(&mut self, entries: &[(VitalField, f64)]) {
        if entries.is_empty() {
            return;
        }
        for &(field, value) in entries {
            self.record.put(field, value);
        }
        self.revision += 1;
    }

    /// Atomically restore the default record.
    pub fn reset(&mut self) {
        self.record = self.defaults;
        self.revision += 1;
    }
}
