//! Port for the persisted "last notified hour" marker.

use crate::notification::domain::HourBucket;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for marker store operations.
pub type MarkerStoreResult<T> = Result<T, MarkerStoreError>;

/// Durable record of the last hour in which a reminder fired.
///
/// The marker survives restarts so at most one reminder fires per local
/// calendar hour.
#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// Returns the last recorded hour, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerStoreError::Persistence`] when storage cannot be read.
    async fn last_notified(&self) -> MarkerStoreResult<Option<HourBucket>>;

    /// Replaces the recorded hour.
    async fn record(&self, bucket: HourBucket) -> MarkerStoreResult<()>;
}

/// Errors returned by marker store implementations.
#[derive(Debug, Clone, Error)]
pub enum MarkerStoreError {
    /// Storage failed.
    #[error("marker persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MarkerStoreError {
    /// Wraps a storage failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
