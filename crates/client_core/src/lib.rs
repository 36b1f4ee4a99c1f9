use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shared::{
    protocol::{HealthResponse, PredictRequest, PredictResponse},
    verification::{
        AttributeInferenceResult, BenchmarkResult, MembershipInferenceResult,
        ModelInversionResult, PrivacyAuditResult, VerificationResult,
    },
};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{info, warn};

pub mod error;
pub mod fallback;
pub mod playground;
pub mod store;
pub mod transport;

pub use error::VerifyError;
pub use store::{DashboardSnapshot, InMemorySnapshotStore, SnapshotStore};
pub use transport::HttpVerificationApi;

/// Remote verification service. One method per endpoint.
#[async_trait]
pub trait VerificationApi: Send + Sync {
    async fn fetch_results(&self) -> Result<VerificationResult, VerifyError>;
    async fn fetch_benchmark(&self) -> Result<BenchmarkResult, VerifyError>;
    async fn run_verification(&self) -> Result<VerificationResult, VerifyError>;
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, VerifyError>;
    async fn membership_inference(&self) -> Result<MembershipInferenceResult, VerifyError>;
    async fn model_inversion(&self) -> Result<ModelInversionResult, VerifyError>;
    async fn attribute_inference(&self) -> Result<AttributeInferenceResult, VerifyError>;
    async fn fetch_privacy_results(&self) -> Result<PrivacyAuditResult, VerifyError>;
    async fn health(&self) -> Result<HealthResponse, VerifyError>;
}

/// Where the privacy audit sequence currently stands.
///
/// `Idle -> MembershipInference -> ModelInversion -> AttributeInference -> Combined`;
/// any failed step drops straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditPhase {
    #[default]
    Idle,
    MembershipInference,
    ModelInversion,
    AttributeInference,
    Combined,
}

impl AuditPhase {
    pub fn step(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::MembershipInference => 1,
            Self::ModelInversion => 2,
            Self::AttributeInference => 3,
            Self::Combined => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::MembershipInference => "Running membership inference attack...",
            Self::ModelInversion => "Running model inversion attack...",
            Self::AttributeInference => "Running attribute inference attack...",
            Self::Combined => "Privacy audit complete",
        }
    }

    pub fn is_running(self) -> bool {
        matches!(
            self,
            Self::MembershipInference | Self::ModelInversion | Self::AttributeInference
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Loaded {
        results_live: bool,
        benchmark_live: bool,
    },
    ResultsReplaced,
    PrivacyResultsReplaced,
    AuditProgress {
        step: u8,
        label: &'static str,
    },
    AuditStepCompleted {
        step: u8,
    },
    AuditCompleted(PrivacyAuditResult),
    AuditFailed {
        step: u8,
        message: String,
    },
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback,
}

/// A dashboard section's data together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView<T> {
    pub source: DataSource,
    pub data: T,
}

impl<T> SectionView<T> {
    fn live_or(value: Option<T>, fallback: impl FnOnce() -> T) -> Self {
        match value {
            Some(data) => Self {
                source: DataSource::Live,
                data,
            },
            None => Self {
                source: DataSource::Fallback,
                data: fallback(),
            },
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == DataSource::Live
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaygroundOutcome {
    Predicted {
        prediction: f64,
        latency_ms: f64,
        model_status: serde_json::Value,
        channels: usize,
        samples: usize,
        generated_signal: bool,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub results_live: bool,
    pub benchmark_live: bool,
}

pub struct VerificationDashboard {
    api: Arc<dyn VerificationApi>,
    store: Arc<dyn SnapshotStore>,
    // Serializes read-modify-write cycles against the store.
    commit_lock: Mutex<()>,
    audit_phase: RwLock<AuditPhase>,
    events: broadcast::Sender<DashboardEvent>,
}

impl VerificationDashboard {
    pub fn new(api: Arc<dyn VerificationApi>) -> Arc<Self> {
        Self::new_with_store(api, Arc::new(InMemorySnapshotStore::new()))
    }

    pub fn new_with_store(
        api: Arc<dyn VerificationApi>,
        store: Arc<dyn SnapshotStore>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            api,
            store,
            commit_lock: Mutex::new(()),
            audit_phase: RwLock::new(AuditPhase::Idle),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: DashboardEvent) {
        let _ = self.events.send(event);
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.store.get().await
    }

    pub async fn audit_phase(&self) -> AuditPhase {
        *self.audit_phase.read().await
    }

    async fn set_phase(&self, phase: AuditPhase) {
        *self.audit_phase.write().await = phase;
    }

    async fn commit(&self, apply: impl FnOnce(&mut DashboardSnapshot)) {
        let _guard = self.commit_lock.lock().await;
        let mut next = self.store.get().await;
        apply(&mut next);
        self.store.set(next).await;
    }

    /// Fetches results and benchmark concurrently. Each side is stored as soon
    /// as it answers, so a slow or hung request only holds back its own
    /// section. A failed fetch leaves the store untouched and the view falls
    /// back to the published literals.
    pub async fn load(&self) -> LoadReport {
        let results = async {
            match self.api.fetch_results().await {
                Ok(results) => {
                    self.commit(|snapshot| snapshot.results = Some(results)).await;
                    true
                }
                Err(err) => {
                    warn!("verify: results fetch failed: {err}");
                    false
                }
            }
        };
        let benchmark = async {
            match self.api.fetch_benchmark().await {
                Ok(benchmark) => {
                    self.commit(|snapshot| snapshot.benchmark = Some(benchmark))
                        .await;
                    true
                }
                Err(err) => {
                    warn!("verify: benchmark fetch failed: {err}");
                    false
                }
            }
        };

        let (results_live, benchmark_live) = futures::future::join(results, benchmark).await;
        let report = LoadReport {
            results_live,
            benchmark_live,
        };

        info!(
            "verify: initial load results_live={} benchmark_live={}",
            report.results_live, report.benchmark_live
        );
        self.emit(DashboardEvent::Loaded {
            results_live: report.results_live,
            benchmark_live: report.benchmark_live,
        });
        report
    }

    pub async fn results_view(&self) -> SectionView<VerificationResult> {
        SectionView::live_or(self.store.get().await.results, fallback::results)
    }

    pub async fn benchmark_view(&self) -> SectionView<BenchmarkResult> {
        SectionView::live_or(self.store.get().await.benchmark, fallback::benchmark)
    }

    /// Asks the service for a fresh verification run. On failure the cached
    /// results are left as they were and the message is kept in `last_error`.
    pub async fn rerun_verification(&self) -> Result<VerificationResult, VerifyError> {
        info!("verify: re-run requested");
        match self.api.run_verification().await {
            Ok(fresh) => {
                let stored = fresh.clone();
                self.commit(|snapshot| {
                    snapshot.results = Some(stored);
                    snapshot.last_error = None;
                })
                .await;
                info!(
                    "verify: re-run complete normalized_error={:.4}",
                    fresh.overall.normalized_error
                );
                self.emit(DashboardEvent::ResultsReplaced);
                Ok(fresh)
            }
            Err(err) => {
                let message = err.display_message();
                warn!("verify: re-run failed: {err}");
                self.commit(|snapshot| snapshot.last_error = Some(message.clone()))
                    .await;
                self.emit(DashboardEvent::Error(message));
                Err(err)
            }
        }
    }

    /// Runs the three privacy attacks one after another and stores the
    /// combined audit. Any failing step abandons the run; the previously
    /// combined audit, if any, stays cached.
    pub async fn run_privacy_audit(&self) -> Result<PrivacyAuditResult, VerifyError> {
        {
            let mut phase = self.audit_phase.write().await;
            if phase.is_running() {
                return Err(VerifyError::AuditInProgress);
            }
            *phase = AuditPhase::MembershipInference;
        }

        match self.run_privacy_steps().await {
            Ok(audit) => {
                let stored = audit.clone();
                self.commit(|snapshot| snapshot.privacy = Some(stored)).await;
                self.set_phase(AuditPhase::Combined).await;
                info!(
                    "verify: privacy audit combined overall={} certified={}",
                    audit.overall_grade, audit.privacy_certified
                );
                self.emit(DashboardEvent::AuditCompleted(audit.clone()));
                Ok(audit)
            }
            Err((step, err)) => {
                self.set_phase(AuditPhase::Idle).await;
                warn!("verify: privacy audit aborted at step {step}: {err}");
                self.emit(DashboardEvent::AuditFailed {
                    step,
                    message: err.display_message(),
                });
                Err(err)
            }
        }
    }

    async fn enter_step(&self, phase: AuditPhase) {
        self.set_phase(phase).await;
        self.emit(DashboardEvent::AuditProgress {
            step: phase.step(),
            label: phase.label(),
        });
    }

    async fn run_privacy_steps(&self) -> Result<PrivacyAuditResult, (u8, VerifyError)> {
        self.enter_step(AuditPhase::MembershipInference).await;
        let membership = self.api.membership_inference().await.map_err(|e| (1, e))?;
        self.emit(DashboardEvent::AuditStepCompleted { step: 1 });

        self.enter_step(AuditPhase::ModelInversion).await;
        let inversion = self.api.model_inversion().await.map_err(|e| (2, e))?;
        self.emit(DashboardEvent::AuditStepCompleted { step: 2 });

        self.enter_step(AuditPhase::AttributeInference).await;
        let attribute = self.api.attribute_inference().await.map_err(|e| (3, e))?;
        self.emit(DashboardEvent::AuditStepCompleted { step: 3 });

        Ok(PrivacyAuditResult::combine(
            membership,
            inversion,
            attribute,
            Utc::now(),
        ))
    }

    /// Pulls the service's cached combined audit.
    pub async fn refresh_privacy_results(&self) -> Result<PrivacyAuditResult, VerifyError> {
        match self.api.fetch_privacy_results().await {
            Ok(audit) => {
                let stored = audit.clone();
                self.commit(|snapshot| snapshot.privacy = Some(stored)).await;
                self.emit(DashboardEvent::PrivacyResultsReplaced);
                Ok(audit)
            }
            Err(err) => {
                warn!("verify: privacy results fetch failed: {err}");
                Err(err)
            }
        }
    }

    /// Sends a signal to the prediction endpoint. Every failure, including a
    /// malformed hand-edited payload, comes back as [`PlaygroundOutcome::Failed`].
    pub async fn predict(&self, payload: Option<&str>) -> PlaygroundOutcome {
        let (request, generated_signal) = match playground::resolve_payload(payload) {
            Ok(resolved) => resolved,
            Err(err) => {
                return PlaygroundOutcome::Failed {
                    message: err.display_message(),
                }
            }
        };

        match self.api.predict(&request).await {
            Ok(response) => {
                info!(
                    "verify: prediction={:.4} latency_ms={:.1}",
                    response.prediction, response.latency_ms
                );
                PlaygroundOutcome::Predicted {
                    prediction: response.prediction,
                    latency_ms: response.latency_ms,
                    model_status: response.model_status,
                    channels: request.channel_count(),
                    samples: request.sample_count(),
                    generated_signal,
                }
            }
            Err(err) => {
                warn!("verify: prediction failed: {err}");
                PlaygroundOutcome::Failed {
                    message: err.display_message(),
                }
            }
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, VerifyError> {
        self.api.health().await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
