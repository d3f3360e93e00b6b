//! Local sensor-jitter simulator.

use crate::field::VitalField;
use crate::store::VitalsStore;

/// Per-field jitter amplitude and physiologic clamp band.
const JITTER: [(VitalField, f64, f64, f64); 5] = [
    (VitalField::HeartRate, 2.0, 60.0, 90.0),
    (VitalField::Spo2, 1.0, 90.0, 100.0),
    (VitalField::Systolic, 3.0, 110.0, 130.0),
    (VitalField::Diastolic, 2.0, 70.0, 85.0),
    (VitalField::Temperature, 0.1, 36.1, 37.2),
];

/// Produces small pseudo-random perturbations of the clinical fields.
///
/// Each tick applies a bounded delta and clamps the result into a
/// hardcoded physiologic sub-range. Clamping (rather than rejection)
/// is intentional here: the simulator exists for visual realism, and
/// its clamp bands sit strictly inside the accept ranges, so its
/// writes are valid by construction. Environment fields are never
/// touched.
///
/// The generator is a seedable xorshift so runs are reproducible.
#[derive(Debug, Clone)]
pub struct Simulator {
    state: u64,
    enabled: bool,
}

impl Simulator {
    /// Create a simulator with the given seed. Auto-update starts
    /// enabled.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            // xorshift cannot leave the zero state
            state: if seed == 0 { 0x9e37_79b9 } else { seed },
            enabled: true,
        }
    }

    /// Whether auto-update is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable auto-update.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Apply one perturbation step to the store.
    ///
    /// Returns `false` without touching the store when auto-update is
    /// disabled. Mode gating (local vs backend) is the session's job.
    pub fn tick(&mut self, store: &mut VitalsStore) -> bool {
        if !self.enabled {
            return false;
        }
        let mut entries = [(VitalField::HeartRate, 0.0); 5];
        for (slot, &(field, amplitude, lo, hi)) in entries.iter_mut().zip(JITTER.iter()) {
            let delta = self.next_unit() * amplitude;
            let value = (store.get(field) + delta).clamp(lo, hi);
            *slot = (field, value);
        }
        store.commit_all(&entries);
        true
    }

    /// Next pseudo-random value in [-1, 1].
    fn next_unit(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        // Map the top 53 bits onto [0, 1), then center.
        let unit = (x >> 11) as f64 / (1u64 << 53) as f64;
        unit.mul_add(2.0, -1.0)
    }
}
