//! JSON shapes of the backend REST contract.

use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use vigil_core::{VitalField, VitalsRecord};

/// Generic envelope every REST endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error description on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope into the payload or a [`SyncError`].
    pub fn into_result(self) -> Result<T, SyncError> {
        if !self.success {
            return Err(SyncError::Backend(
                self.error
                    .or(self.message)
                    .unwrap_or_else(|| "unspecified failure".to_string()),
            ));
        }
        self.data.ok_or(SyncError::Unavailable)
    }
}

/// A full sample posted to the backend for processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsSample {
    /// Monitored subject identifier
    pub soldier_id: String,
    /// Heart rate, beats/min
    pub heart_rate: f64,
    /// Oxygen saturation, percent
    pub spo2: f64,
    /// Body temperature, degrees Celsius
    pub temperature: f64,
    /// Systolic blood pressure, mmHg
    pub systolic: f64,
    /// Diastolic blood pressure, mmHg
    pub diastolic: f64,
    /// Altitude, meters
    pub altitude: f64,
    /// ISO-8601 sample time
    pub timestamp: String,
}

impl VitalsSample {
    /// Build a sample from the current record.
    #[must_use]
    pub fn from_record(
        soldier_id: impl Into<String>,
        record: &VitalsRecord,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            soldier_id: soldier_id.into(),
            heart_rate: record.heart_rate,
            spo2: record.spo2,
            temperature: record.temperature,
            systolic: record.systolic,
            diastolic: record.diastolic,
            altitude: record.altitude,
            timestamp: timestamp.into(),
        }
    }
}

/// Readings pushed from the backend (REST pull or live channel).
///
/// Every numeric field is optional: an absent field leaves the
/// corresponding store field unchanged (fallback-to-current, never
/// zero-fill).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsPushPayload {
    /// Heart rate, beats/min
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Oxygen saturation, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spo2: Option<f64>,
    /// Systolic blood pressure, mmHg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<f64>,
    /// Diastolic blood pressure, mmHg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<f64>,
    /// Body temperature, degrees Celsius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Altitude, meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Attached model analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_analysis: Option<MlAnalysis>,
}

impl VitalsPushPayload {
    /// The `(field, value)` pairs actually present in this payload.
    #[must_use]
    pub fn fields(&self) -> Vec<(VitalField, f64)> {
        let mapping = [
            (VitalField::HeartRate, self.heart_rate),
            (VitalField::Spo2, self.spo2),
            (VitalField::Systolic, self.systolic),
            (VitalField::Diastolic, self.diastolic),
            (VitalField::Temperature, self.temperature),
            (VitalField::Altitude, self.altitude),
        ];
        mapping
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }

    /// Whether the payload carries any reading at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

/// Model analysis attached to a processed sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlAnalysis {
    /// Overall health score, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    /// Overall risk level (low/moderate/high/critical)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_risk_level: Option<String>,
    /// Overall risk percentage, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_risk_percentage: Option<f64>,
    /// Health trend (stable/monitor/deteriorating)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_trend: Option<String>,
    /// Recommended actions, highest priority first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
}

/// One recommended action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Priority tag (CRITICAL/URGENT/HIGH/ROUTINE)
    pub priority: String,
    /// Display icon
    #[serde(default)]
    pub icon: String,
    /// Action text
    pub action: String,
}

/// Simplified risk prediction from `POST /api/predict/risk`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// Risk level (low/moderate/high/critical)
    #[serde(default)]
    pub risk_level: String,
    /// Risk percentage, 0-100
    #[serde(default)]
    pub risk_percentage: f64,
    /// Health score, 0-100
    #[serde(default)]
    pub health_score: f64,
}

/// One stored alert from `GET /api/alerts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Alert category
    pub alert_type: String,
    /// Severity (high/critical)
    pub severity: String,
    /// Alert text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Creation time, ISO-8601
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Answer of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Reported status string
    pub status: String,
    /// Informational message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Backend version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthStatus {
    /// The backend counts as available iff it reports "operational".
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.status == "operational"
    }
}
