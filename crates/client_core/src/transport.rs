//! reqwest-backed implementation of [`VerificationApi`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::ApiErrorBody,
    protocol::{
        HealthResponse, PredictRequest, PredictResponse, ATTRIBUTE_INFERENCE_PATH,
        BENCHMARK_PATH, HEALTH_PATH, MEMBERSHIP_INFERENCE_PATH, MODEL_INVERSION_PATH,
        PREDICT_PATH, PRIVACY_RESULTS_PATH, RESULTS_PATH, RUN_PATH,
    },
    verification::{
        AttributeInferenceResult, BenchmarkResult, MembershipInferenceResult,
        ModelInversionResult, PrivacyAuditResult, VerificationResult,
    },
};
use tracing::debug;
use url::Url;

use crate::{error::VerifyError, VerificationApi};

pub struct HttpVerificationApi {
    http: Client,
    base_url: String,
}

impl HttpVerificationApi {
    /// The client is built without a request timeout; a hung request stays
    /// pending until the server answers or the connection drops.
    pub fn new(base_url: &str) -> Result<Self, VerifyError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, VerifyError> {
        debug!("verify-api: GET {path}");
        let res = self.http.get(self.endpoint(path)).send().await?;
        decode_response(res).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, VerifyError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!("verify-api: POST {path}");
        let res = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        decode_response(res).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, VerifyError> {
        self.post_json(path, &serde_json::json!({})).await
    }
}

/// Validates `raw` as an absolute http(s) URL and drops any trailing slash so
/// endpoint paths can be appended directly.
pub fn normalize_base_url(raw: &str) -> Result<String, VerifyError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|_| VerifyError::InvalidBaseUrl(raw.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(VerifyError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

async fn decode_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, VerifyError> {
    let status = res.status();
    let body = res.bytes().await?;
    if !status.is_success() {
        return Err(error_from_body(status, &body));
    }
    serde_json::from_slice(&body).map_err(|err| VerifyError::Decode(err.to_string()))
}

/// Builds the error for a non-2xx answer: the body's `detail` when it is
/// readable, otherwise the status reason phrase.
pub(crate) fn error_from_body(status: StatusCode, body: &[u8]) -> VerifyError {
    let detail = serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });
    VerifyError::Http {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl VerificationApi for HttpVerificationApi {
    async fn fetch_results(&self) -> Result<VerificationResult, VerifyError> {
        self.get_json(RESULTS_PATH).await
    }

    async fn fetch_benchmark(&self) -> Result<BenchmarkResult, VerifyError> {
        self.get_json(BENCHMARK_PATH).await
    }

    async fn run_verification(&self) -> Result<VerificationResult, VerifyError> {
        self.post_empty(RUN_PATH).await
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, VerifyError> {
        self.post_json(PREDICT_PATH, request).await
    }

    async fn membership_inference(&self) -> Result<MembershipInferenceResult, VerifyError> {
        self.post_empty(MEMBERSHIP_INFERENCE_PATH).await
    }

    async fn model_inversion(&self) -> Result<ModelInversionResult, VerifyError> {
        self.post_empty(MODEL_INVERSION_PATH).await
    }

    async fn attribute_inference(&self) -> Result<AttributeInferenceResult, VerifyError> {
        self.post_empty(ATTRIBUTE_INFERENCE_PATH).await
    }

    async fn fetch_privacy_results(&self) -> Result<PrivacyAuditResult, VerifyError> {
        self.get_json(PRIVACY_RESULTS_PATH).await
    }

    async fn health(&self) -> Result<HealthResponse, VerifyError> {
        self.get_json(HEALTH_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        assert_eq!(
            normalize_base_url("https://verify.example.org/").expect("url"),
            "https://verify.example.org"
        );
        assert_eq!(
            normalize_base_url("  http://127.0.0.1:8000  ").expect("url"),
            "http://127.0.0.1:8000"
        );
    }

    #[test]
    fn base_url_requires_http_scheme_and_host() {
        assert!(matches!(
            normalize_base_url("verify.example.org"),
            Err(VerifyError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("ftp://verify.example.org"),
            Err(VerifyError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn error_body_detail_wins_over_status_text() {
        let err = error_from_body(
            StatusCode::SERVICE_UNAVAILABLE,
            br#"{"detail": "model weights not loaded"}"#,
        );
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.display_message(), "model weights not loaded");
    }

    #[test]
    fn unparseable_error_body_falls_back_to_status_text() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, b"<html>upstream down</html>");
        assert_eq!(err.display_message(), "Bad Gateway");

        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, br#"{"detail": ""}"#);
        assert_eq!(err.display_message(), "Internal Server Error");
    }
}
