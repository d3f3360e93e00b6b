//! Clinical status classification.
//!
//! Status is a display concern layered on top of the accept ranges: a
//! value can be accepted by [`crate::validate`] and still classify as
//! warning or critical. Thresholds here are the documented clinical
//! ones; fields without documented tiers always classify as stable.

use crate::field::VitalField;
use crate::record::VitalsRecord;
use serde::{Deserialize, Serialize};

/// Three-level status of a reading.
///
/// Ordered so that `max` picks the worst status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VitalStatus {
    /// Within the stable band
    #[default]
    Stable,
    /// Outside the stable band
    Warning,
    /// Dangerously outside the stable band
    Critical,
}

impl VitalStatus {
    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    /// CSS class used by the badge collaborators.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Numeric severity (0 stable, 1 warning, 2 critical).
    #[must_use]
    pub const fn severity(&self) -> u8 {
        match self {
            Self::Stable => 0,
            Self::Warning => 1,
            Self::Critical => 2,
        }
    }
}

/// General rule for fields without bespoke tiers: warning outside the
/// stable band, critical more than 10% beyond either bound.
#[must_use]
pub fn classify_range(value: f64, min: f64, max: f64) -> VitalStatus {
    if value < min * 0.9 || value > max * 1.1 {
        VitalStatus::Critical
    } else if value < min || value > max {
        VitalStatus::Warning
    } else {
        VitalStatus::Stable
    }
}

/// Classify one field's current value.
///
/// Diastolic pressure and the environment fields have no documented
/// thresholds and always classify as stable; blood pressure status keys
/// off systolic alone.
#[must_use]
pub fn classify(field: VitalField, value: f64) -> VitalStatus {
    match field {
        VitalField::HeartRate => {
            if value < 50.0 || value > 110.0 {
                VitalStatus::Critical
            } else if value < 60.0 || value > 100.0 {
                VitalStatus::Warning
            } else {
                VitalStatus::Stable
            }
        }
        VitalField::Spo2 => {
            if value < 88.0 {
                VitalStatus::Critical
            } else if value < 92.0 {
                VitalStatus::Warning
            } else {
                VitalStatus::Stable
            }
        }
        VitalField::Temperature => {
            // No critical tier is documented for temperature.
            if (36.1..=37.2).contains(&value) {
                VitalStatus::Stable
            } else {
                VitalStatus::Warning
            }
        }
        VitalField::Systolic => classify_range(value, 90.0, 130.0),
        VitalField::Diastolic
        | VitalField::Altitude
        | VitalField::ExtTemp
        | VitalField::Humidity => VitalStatus::Stable,
    }
}

/// Overall subject status: the worst of heart rate and SpO2.
#[must_use]
pub fn overall(record: &VitalsRecord) -> VitalStatus {
    classify(VitalField::HeartRate, record.heart_rate)
        .max(classify(VitalField::Spo2, record.spo2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_heart_rate_boundaries() {
        assert_eq!(classify(VitalField::HeartRate, 100.0), VitalStatus::Stable);
        assert_eq!(classify(VitalField::HeartRate, 101.0), VitalStatus::Warning);
        assert_eq!(classify(VitalField::HeartRate, 111.0), VitalStatus::Critical);
        assert_eq!(classify(VitalField::HeartRate, 60.0), VitalStatus::Stable);
        assert_eq!(classify(VitalField::HeartRate, 59.0), VitalStatus::Warning);
        assert_eq!(classify(VitalField::HeartRate, 50.0), VitalStatus::Warning);
        assert_eq!(classify(VitalField::HeartRate, 49.0), VitalStatus::Critical);
    }

    #[test]
    fn test_spo2_boundaries() {
        assert_eq!(classify(VitalField::Spo2, 100.0), VitalStatus::Stable);
        assert_eq!(classify(VitalField::Spo2, 92.0), VitalStatus::Stable);
        assert_eq!(classify(VitalField::Spo2, 91.9), VitalStatus::Warning);
        assert_eq!(classify(VitalField::Spo2, 88.0), VitalStatus::Warning);
        assert_eq!(classify(VitalField::Spo2, 87.9), VitalStatus::Critical);
    }

    #[test]
    fn test_temperature_has_no_critical_tier() {
        assert_eq!(classify(VitalField::Temperature, 36.1), VitalStatus::Stable);
        assert_eq!(classify(VitalField::Temperature, 37.2), VitalStatus::Stable);
        assert_eq!(classify(VitalField::Temperature, 35.0), VitalStatus::Warning);
        assert_eq!(classify(VitalField::Temperature, 41.0), VitalStatus::Warning);
    }

    #[test]
    fn test_systolic_general_rule() {
        assert_eq!(classify(VitalField::Systolic, 120.0), VitalStatus::Stable);
        assert_eq!(classify(VitalField::Systolic, 90.0), VitalStatus::Stable);
        assert_eq!(classify(VitalField::Systolic, 89.0), VitalStatus::Warning);
        assert_eq!(classify(VitalField::Systolic, 135.0), VitalStatus::Warning);
        // 10% beyond the bounds: below 81 or above 143.
        assert_eq!(classify(VitalField::Systolic, 80.0), VitalStatus::Critical);
        assert_eq!(classify(VitalField::Systolic, 144.0), VitalStatus::Critical);
    }

    #[test]
    fn test_undocumented_fields_are_stable() {
        assert_eq!(classify(VitalField::Diastolic, 500.0), VitalStatus::Stable);
        assert_eq!(classify(VitalField::Altitude, 9000.0), VitalStatus::Stable);
        assert_eq!(classify(VitalField::Humidity, -3.0), VitalStatus::Stable);
    }

    #[test]
    fn test_overall_takes_worst_of_hr_and_spo2() {
        let mut record = VitalsRecord::default();
        assert_eq!(overall(&record), VitalStatus::Stable);

        record.heart_rate = 105.0;
        assert_eq!(overall(&record), VitalStatus::Warning);

        record.spo2 = 85.0;
        assert_eq!(overall(&record), VitalStatus::Critical);

        // Temperature never feeds the overall status.
        record.heart_rate = 72.0;
        record.spo2 = 96.0;
        record.temperature = 41.0;
        assert_eq!(overall(&record), VitalStatus::Stable);
    }

    #[test]
    fn test_status_ordering() {
        assert!(VitalStatus::Critical > VitalStatus::Warning);
        assert!(VitalStatus::Warning > VitalStatus::Stable);
        assert_eq!(VitalStatus::Stable.severity(), 0);
        assert_eq!(VitalStatus::Critical.severity(), 2);
    }

    proptest! {
        #[test]
        fn prop_general_rule_tiers_nest(value in 0.0f64..300.0) {
            // Critical implies outside the stable band; stable implies
            // not critical.
            let status = classify_range(value, 90.0, 130.0);
            match status {
                VitalStatus::Stable => prop_assert!((90.0..=130.0).contains(&value)),
                VitalStatus::Warning => prop_assert!(!(90.0..=130.0).contains(&value)),
                VitalStatus::Critical => {
                    prop_assert!(value < 90.0 * 0.9 || value > 130.0 * 1.1);
                }
            }
        }
    }
}
