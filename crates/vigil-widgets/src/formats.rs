//! Display formatting for readings.

use vigil_core::VitalField;

/// Format a reading with its unit, using the precision the dashboard
/// displays for that field.
#[must_use]
pub fn format_reading(field: VitalField, value: f64) -> String {
    match field {
        VitalField::Temperature | VitalField::ExtTemp => {
            format!("{:.1} {}", value, field.unit())
        }
        VitalField::HeartRate
        | VitalField::Spo2
        | VitalField::Systolic
        | VitalField::Diastolic
        | VitalField::Altitude
        | VitalField::Humidity => format!("{:.0} {}", value, field.unit()),
    }
}
