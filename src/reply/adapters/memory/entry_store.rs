//! In-memory entry store for engine tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::reply::domain::{EntryId, EntryRecord};
use crate::reply::ports::{EntryStore, EntryStoreError, EntryStoreResult};

/// Thread-safe in-memory entry store with last-write-wins puts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntryStore {
    state: Arc<RwLock<HashMap<EntryId, EntryRecord>>>,
}

impl InMemoryEntryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`EntryStoreError`] when the lock is poisoned.
    pub fn len(&self) -> EntryStoreResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| EntryStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.len())
    }

    /// Returns `true` when the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`EntryStoreError`] when the lock is poisoned.
    pub fn is_empty(&self) -> EntryStoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn get(&self, id: EntryId) -> EntryStoreResult<Option<EntryRecord>> {
        let state = self
            .state
            .read()
            .map_err(|err| EntryStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.get(&id).cloned())
    }

    async fn put(&self, record: &EntryRecord) -> EntryStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| EntryStoreError::persistence(std::io::Error::other(err.to_string())))?;
        state.insert(record.id(), record.clone());
        Ok(())
    }
}
