//! The single mutable record of current readings.

use crate::field::VitalField;
use serde::{Deserialize, Serialize};

/// Current readings for the monitored subject.
///
/// One record exists per [`crate::VitalsStore`]; producers never hold a
/// copy they mutate independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsRecord {
    /// Heart rate, beats/min
    pub heart_rate: f64,
    /// Oxygen saturation, percent
    pub spo2: f64,
    /// Systolic blood pressure, mmHg
    pub systolic: f64,
    /// Diastolic blood pressure, mmHg
    pub diastolic: f64,
    /// Body temperature, degrees Celsius
    pub temperature: f64,
    /// Altitude, meters
    pub altitude: f64,
    /// External temperature, degrees Celsius
    pub ext_temp: f64,
    /// Relative humidity, percent
    pub humidity: f64,
}

impl Default for VitalsRecord {
    fn default() -> Self {
        Self {
            heart_rate: 72.0,
            spo2: 96.0,
            systolic: 120.0,
            diastolic: 80.0,
            temperature: 36.8,
            altitude: 5400.0,
            ext_temp: -15.0,
            humidity: 42.0,
        }
    }
}

impl VitalsRecord {
    /// Read one field.
    #[must_use]
    pub const fn get(&self, field: VitalField) -> f64 {
        match field {
            VitalField::HeartRate => self.heart_rate,
            VitalField::Spo2 => self.spo2,
            VitalField::Systolic => self.systolic,
            VitalField::Diastolic => self.diastolic,
            VitalField::Temperature => self.temperature,
            VitalField::Altitude => self.altitude,
            VitalField::ExtTemp => self.ext_temp,
            VitalField::Humidity => self.humidity,
        }
    }

    /// Overwrite one field. Validation is the caller's contract.
    pub fn put(&mut self, field: VitalField, value: f64) {
        match field {
            VitalField::HeartRate => self.heart_rate = value,
            VitalField::Spo2 => self.spo2 = value,
            VitalField::Systolic => self.systolic = value,
            VitalField::Diastolic => self.diastolic = value,
            VitalField::Temperature => self.temperature = value,
            VitalField::Altitude => self.altitude = value,
            VitalField::ExtTemp => self.ext_temp = value,
            VitalField::Humidity => self.humidity = value,
        }
    }
}
