use async_trait::async_trait;
use shared::verification::{BenchmarkResult, PrivacyAuditResult, VerificationResult};
use tokio::sync::RwLock;

/// Everything the dashboard has cached from the verification service.
/// Each field is a whole remote snapshot; `None` means never fetched or the
/// last fetch failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub results: Option<VerificationResult>,
    pub benchmark: Option<BenchmarkResult>,
    pub privacy: Option<PrivacyAuditResult>,
    pub last_error: Option<String>,
}

/// Holder of the dashboard snapshot. Implementations replace the stored value
/// wholesale on `set`.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn get(&self) -> DashboardSnapshot;
    async fn set(&self, snapshot: DashboardSnapshot);
}

#[derive(Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<DashboardSnapshot>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: DashboardSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn get(&self) -> DashboardSnapshot {
        self.inner.read().await.clone()
    }

    async fn set(&self, snapshot: DashboardSnapshot) {
        *self.inner.write().await = snapshot;
    }
}
