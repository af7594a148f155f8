//! Best-effort audit recording.
//!
//! Each completed analysis is written once to an insert-only table. Failures are
//! logged and swallowed: the audit trail is secondary to the user-visible response.
//! Every attempt is bounded in time so a stalled store cannot hold a response.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use symptom_types::AnalysisResult;

use crate::config::AuditConfig;
use crate::constants::DEFAULT_AUDIT_TIMEOUT_SECS;
use crate::{CoreError, CoreResult, PersistenceError};

/// One audit row: the symptom text and the analysis returned for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub symptoms: String,
    pub analysis: AnalysisResult,
    pub user_id: Option<String>,
}

/// Insert-only persistence for audit records.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn insert(&self, record: &AuditRecord) -> Result<(), PersistenceError>;
}

/// Writes audit rows through a PostgREST endpoint (`{base}/rest/v1/{table}`).
pub struct PostgrestAuditStore {
    http: reqwest::Client,
    endpoint: String,
    service_key: String,
}

impl PostgrestAuditStore {
    pub fn new(config: &AuditConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{}/rest/v1/{}", config.base_url(), config.table()),
            service_key: config.service_key().to_string(),
        })
    }
}

#[async_trait]
impl AuditStore for PostgrestAuditStore {
    async fn insert(&self, record: &AuditRecord) -> Result<(), PersistenceError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| PersistenceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Discards every record. Used when auditing is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditStore;

#[async_trait]
impl AuditStore for NoopAuditStore {
    async fn insert(&self, _record: &AuditRecord) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Wraps an [`AuditStore`] so that writes can never fail the caller.
pub struct AuditRecorder {
    store: Box<dyn AuditStore>,
    max_attempts: u32,
    timeout: Duration,
}

impl AuditRecorder {
    pub fn new(store: Box<dyn AuditStore>, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
            timeout: Duration::from_secs(DEFAULT_AUDIT_TIMEOUT_SECS),
        }
    }

    /// Bound each insert attempt to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attempt to persist `record`. Returns whether it was written.
    pub async fn record(&self, record: AuditRecord) -> bool {
        for attempt in 1..=self.max_attempts {
            let result = tokio::time::timeout(self.timeout, self.store.insert(&record))
                .await
                .unwrap_or(Err(PersistenceError::TimedOut(self.timeout)));
            match result {
                Ok(()) => {
                    tracing::debug!(attempt, "audit record written");
                    return true;
                }
                Err(e) => {
                    tracing::error!(attempt, max_attempts = self.max_attempts, error = %e, "audit insert failed");
                }
            }
        }
        false
    }
}
