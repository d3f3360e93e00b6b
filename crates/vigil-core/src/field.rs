//! The closed set of monitored fields.

use serde::{Deserialize, Serialize};

/// Inclusive accept range for a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptedRange {
    /// Lower inclusive bound
    pub min: f64,
    /// Upper inclusive bound
    pub max: f64,
}

impl AcceptedRange {
    /// Create a range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// A monitored field of the vitals record.
///
/// Clinical fields carry an accept range enforced before every commit;
/// environment fields are unconstrained (except humidity, which is a
/// percentage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalField {
    /// Heart rate, beats/min
    HeartRate,
    /// Peripheral oxygen saturation, percent
    Spo2,
    /// Systolic blood pressure, mmHg
    Systolic,
    /// Diastolic blood pressure, mmHg
    Diastolic,
    /// Core body temperature, degrees Celsius
    Temperature,
    /// Altitude, meters
    Altitude,
    /// External temperature, degrees Celsius
    ExtTemp,
    /// Relative humidity, percent
    Humidity,
}

impl VitalField {
    /// All fields, in display order.
    pub const ALL: [Self; 8] = [
        Self::HeartRate,
        Self::Spo2,
        Self::Systolic,
        Self::Diastolic,
        Self::Temperature,
        Self::Altitude,
        Self::ExtTemp,
        Self::Humidity,
    ];

    /// The five clinical fields that require validation before commit.
    pub const CLINICAL: [Self; 5] = [
        Self::HeartRate,
        Self::Spo2,
        Self::Systolic,
        Self::Diastolic,
        Self::Temperature,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HeartRate => "Heart rate",
            Self::Spo2 => "SpO2",
            Self::Systolic => "Systolic pressure",
            Self::Diastolic => "Diastolic pressure",
            Self::Temperature => "Body temperature",
            Self::Altitude => "Altitude",
            Self::ExtTemp => "External temperature",
            Self::Humidity => "Humidity",
        }
    }

    /// Display unit.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::HeartRate => "beats/min",
            Self::Spo2 | Self::Humidity => "%",
            Self::Systolic | Self::Diastolic => "mmHg",
            Self::Temperature | Self::ExtTemp => "\u{b0}C",
            Self::Altitude => "m",
        }
    }

    /// Wire name used by the backend REST contract.
    #[must_use]
    pub const fn wire_key(&self) -> &'static str {
        match self {
            Self::HeartRate => "heart_rate",
            Self::Spo2 => "spo2",
            Self::Systolic => "systolic",
            Self::Diastolic => "diastolic",
            Self::Temperature => "temperature",
            Self::Altitude => "altitude",
            Self::ExtTemp => "ext_temp",
            Self::Humidity => "humidity",
        }
    }

    /// The accept range enforced before commit, if any.
    ///
    /// `None` disables range checking (altitude and external
    /// temperature are unconstrained).
    #[must_use]
    pub const fn accepted_range(&self) -> Option<AcceptedRange> {
        match self {
            Self::HeartRate => Some(AcceptedRange::new(40.0, 200.0)),
            Self::Spo2 => Some(AcceptedRange::new(70.0, 100.0)),
            Self::Systolic => Some(AcceptedRange::new(80.0, 200.0)),
            Self::Diastolic => Some(AcceptedRange::new(50.0, 120.0)),
            Self::Temperature => Some(AcceptedRange::new(35.0, 42.0)),
            Self::Humidity => Some(AcceptedRange::new(0.0, 100.0)),
            Self::Altitude | Self::ExtTemp => None,
        }
    }

    /// Whether this is a clinical field (validated on every write).
    #[must_use]
    pub const fn is_clinical(&self) -> bool {
        matches!(
            self,
            Self::HeartRate | Self::Spo2 | Self::Systolic | Self::Diastolic | Self::Temperature
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinical_fields_have_ranges() {
        for field in VitalField::CLINICAL {
            assert!(field.accepted_range().is_some(), "{field:?}");
            assert!(field.is_clinical());
        }
    }

    #[test]
    fn test_environment_fields_unconstrained() {
        assert!(VitalField::Altitude.accepted_range().is_none());
        assert!(VitalField::ExtTemp.accepted_range().is_none());
        assert!(!VitalField::Altitude.is_clinical());
        assert!(!VitalField::Humidity.is_clinical());
    }

    #[test]
    fn test_humidity_is_percentage() {
        let range = VitalField::Humidity.accepted_range().unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 100.0);
    }

    #[test]
    fn test_wire_key_serde_agreement() {
        for field in VitalField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.wire_key()));
        }
    }

    #[test]
    fn test_all_is_exhaustive() {
        assert_eq!(VitalField::ALL.len(), 8);
        assert_eq!(VitalField::CLINICAL.len(), 5);
    }
}
