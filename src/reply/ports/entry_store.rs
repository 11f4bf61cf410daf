//! Entry store port: durable single-key persistence for command entries.

use crate::reply::domain::{EntryId, EntryRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for entry store operations.
pub type EntryStoreResult<T> = Result<T, EntryStoreError>;

/// Durable key-value persistence contract, keyed solely by [`EntryId`].
///
/// `put` is an upsert with last-write-wins semantics; no transactions or
/// multi-key operations exist, so concurrent reconciliation passes for the
/// same entry stay safe as long as `update` remains idempotent.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Loads the record stored under `id`.
    ///
    /// Returns `None` when no record exists.
    ///
    /// # Errors
    ///
    /// Returns [`EntryStoreError`] when the backing store fails.
    async fn get(&self, id: EntryId) -> EntryStoreResult<Option<EntryRecord>>;

    /// Stores `record` under its own identifier, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`EntryStoreError`] when the backing store fails.
    async fn put(&self, record: &EntryRecord) -> EntryStoreResult<()>;
}

/// Errors returned by entry store implementations.
#[derive(Debug, Clone, Error)]
pub enum EntryStoreError {
    /// Persistence-layer failure.
    #[error("entry store failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EntryStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
