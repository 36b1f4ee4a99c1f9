use serde::{Deserialize, Serialize};

pub const RESULTS_PATH: &str = "/api/v1/verify/results";
pub const BENCHMARK_PATH: &str = "/api/v1/verify/benchmark";
pub const PREDICT_PATH: &str = "/api/v1/verify/predict";
pub const RUN_PATH: &str = "/api/v1/verify/run";
pub const MEMBERSHIP_INFERENCE_PATH: &str = "/api/v1/verify/privacy/membership-inference";
pub const MODEL_INVERSION_PATH: &str = "/api/v1/verify/privacy/model-inversion";
pub const ATTRIBUTE_INFERENCE_PATH: &str = "/api/v1/verify/privacy/attribute-inference";
pub const PRIVACY_RESULTS_PATH: &str = "/api/v1/verify/privacy/results";
pub const HEALTH_PATH: &str = "/health";

/// Raw multichannel signal submitted to the prediction endpoint.
/// `eeg_raw` is channel-major: one inner vector per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub eeg_raw: Vec<Vec<f64>>,
    pub sfreq: f64,
}

impl PredictRequest {
    pub fn channel_count(&self) -> usize {
        self.eeg_raw.len()
    }

    pub fn sample_count(&self) -> usize {
        self.eeg_raw.first().map(Vec::len).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: f64,
    pub latency_ms: f64,
    #[serde(default)]
    pub model_status: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default = "default_health_status")]
    pub status: String,
}

fn default_health_status() -> String {
    "ok".to_string()
}
