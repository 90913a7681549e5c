//! Health checks
//!
//! `/health` and `/health/live` only prove the process answers.
//! `/health/ready` pings the configured store and reports 503 until it
//! responds.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cortex_core::config::StorageBackend;
use cortex_db::Database;
use cortex_services::CollaborationStore;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// Upper bound on a single store ping
    pub check_timeout: Duration,
    /// How long a report is served from cache
    pub cache_duration: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            check_timeout: Duration::from_secs(3),
            cache_duration: Duration::from_secs(5),
        }
    }
}

struct CachedHealth {
    report: HealthReport,
    cached_at: Instant,
}

pub struct HealthChecker {
    config: HealthConfig,
    start_time: Instant,
    cache: RwLock<Option<CachedHealth>>,
    store: Arc<dyn CollaborationStore>,
    backend: StorageBackend,
    database: Option<Database>,
}

impl HealthChecker {
    pub fn new(
        config: HealthConfig,
        store: Arc<dyn CollaborationStore>,
        backend: StorageBackend,
    ) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            cache: RwLock::new(None),
            store,
            backend,
            database: None,
        }
    }

    /// Include pool statistics in the store report
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    pub async fn check(&self) -> HealthReport {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.cached_at.elapsed() < self.config.cache_duration {
                    debug!("returning cached health report");
                    return cached.report.clone();
                }
            }
        }

        let store = self.check_store().await;
        let report = HealthReport {
            status: store.status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components: vec![store],
            timestamp: chrono::Utc::now(),
        };

        *self.cache.write().await = Some(CachedHealth {
            report: report.clone(),
            cached_at: Instant::now(),
        });
        report
    }

    async fn check_store(&self) -> ComponentHealth {
        let start = Instant::now();
        let (status, message) =
            match tokio::time::timeout(self.config.check_timeout, self.store.ping()).await {
                Ok(Ok(())) => (HealthStatus::Healthy, None),
                Ok(Err(err)) => {
                    warn!(error = %err, "store ping failed");
                    (HealthStatus::Unhealthy, Some(err.to_string()))
                }
                Err(_) => {
                    warn!(timeout = ?self.config.check_timeout, "store ping timed out");
                    (HealthStatus::Unhealthy, Some("ping timed out".to_string()))
                }
            };

        let backend = match self.backend {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        };
        let mut details = serde_json::json!({ "backend": backend });
        if let Some(database) = &self.database {
            let stats = database.stats();
            details["pool_size"] = stats.size.into();
            details["idle_connections"] = stats.idle.into();
        }

        ComponentHealth {
            name: "store".to_string(),
            status,
            message,
            response_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            details: Some(details),
        }
    }
}

/// Liveness check
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness check
pub async fn readiness(
    State(health): State<Arc<HealthChecker>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = health.check().await;
    (report.http_status(), Json(report))
}
