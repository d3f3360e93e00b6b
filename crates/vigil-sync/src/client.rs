//! Typed REST client over an abstract transport.

use crate::dto::{
    AlertRecord, ApiResponse, HealthStatus, RiskPrediction, VitalsPushPayload, VitalsSample,
};
use crate::error::{SyncError, TransportError};
use serde::Deserialize;

/// Minimal abstraction over the HTTP stack.
///
/// The dashboard never talks HTTP directly; hosts supply whatever
/// implementation their environment offers (browser fetch, a blocking
/// client, a test double). Both methods return the raw response body.
pub trait Transport {
    /// Perform a GET request.
    fn get(&self, url: &str) -> Result<String, TransportError>;

    /// Perform a POST request with a JSON body.
    fn post(&self, url: &str, body: &str) -> Result<String, TransportError>;
}

/// Alerts endpoint envelope (the list rides under `alerts`, not `data`).
#[derive(Debug, Deserialize)]
struct AlertsEnvelope {
    success: bool,
    #[serde(default)]
    alerts: Vec<AlertRecord>,
    #[serde(default)]
    error: Option<String>,
}

/// Risk endpoint envelope (the payload rides under `prediction`).
#[derive(Debug, Deserialize)]
struct PredictionEnvelope {
    success: bool,
    #[serde(default)]
    prediction: Option<RiskPrediction>,
    #[serde(default)]
    error: Option<String>,
}

/// Typed client for the backend REST contract.
#[derive(Debug, Clone)]
pub struct BackendClient<T> {
    base: String,
    transport: T,
}

impl<T: Transport> BackendClient<T> {
    /// Create a client against a base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base, transport }
    }

    /// Configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// `GET /api/health`.
    pub fn health(&self) -> Result<HealthStatus, SyncError> {
        let body = self.transport.get(&format!("{}/api/health", self.base))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Whether the backend reports itself operational. Transport
    /// failures count as unavailable.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.health().is_ok_and(|status| status.is_operational())
    }

    /// `GET /api/vitals/latest/{id}`.
    pub fn latest(&self, soldier_id: &str) -> Result<VitalsPushPayload, SyncError> {
        let body = self
            .transport
            .get(&format!("{}/api/vitals/latest/{soldier_id}", self.base))?;
        let response: ApiResponse<VitalsPushPayload> = serde_json::from_str(&body)?;
        response.into_result()
    }

    /// `GET /api/vitals/history/{id}?limit=&hours=`.
    pub fn history(
        &self,
        soldier_id: &str,
        limit: u32,
        hours: u32,
    ) -> Result<Vec<VitalsPushPayload>, SyncError> {
        let body = self.transport.get(&format!(
            "{}/api/vitals/history/{soldier_id}?limit={limit}&hours={hours}",
            self.base
        ))?;
        let response: ApiResponse<Vec<VitalsPushPayload>> = serde_json::from_str(&body)?;
        response.into_result()
    }

    /// `POST /api/vitals`: submit a sample for processing.
    pub fn send_vitals(&self, sample: &VitalsSample) -> Result<VitalsPushPayload, SyncError> {
        let body = serde_json::to_string(sample)?;
        let reply = self
            .transport
            .post(&format!("{}/api/vitals", self.base), &body)?;
        let response: ApiResponse<VitalsPushPayload> = serde_json::from_str(&reply)?;
        response.into_result()
    }

    /// `POST /api/predict/risk`.
    pub fn predict_risk(&self, sample: &VitalsSample) -> Result<RiskPrediction, SyncError> {
        let body = serde_json::to_string(sample)?;
        let reply = self
            .transport
            .post(&format!("{}/api/predict/risk", self.base), &body)?;
        let envelope: PredictionEnvelope = serde_json::from_str(&reply)?;
        if !envelope.success {
            return Err(SyncError::Backend(
                envelope.error.unwrap_or_else(|| "unspecified failure".to_string()),
            ));
        }
        envelope.prediction.ok_or(SyncError::Unavailable)
    }

    /// `GET /api/alerts/{id}`.
    pub fn alerts(&self, soldier_id: &str) -> Result<Vec<AlertRecord>, SyncError> {
        let body = self
            .transport
            .get(&format!("{}/api/alerts/{soldier_id}", self.base))?;
        let envelope: AlertsEnvelope = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(SyncError::Backend(
                envelope.error.unwrap_or_else(|| "unspecified failure".to_string()),
            ));
        }
        Ok(envelope.alerts)
    }

    /// `POST /api/simulate`: ask the backend to generate one sample.
    pub fn simulate(&self) -> Result<VitalsPushPayload, SyncError> {
        let reply = self
            .transport
            .post(&format!("{}/api/simulate", self.base), "{}")?;
        let response: ApiResponse<VitalsPushPayload> = serde_json::from_str(&reply)?;
        response.into_result()
    }
}
