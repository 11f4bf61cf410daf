//! Capability-scoped filesystem entry store.
//!
//! One JSON file per record inside a capability directory; the process can
//! only reach entries through the handle it was opened with. Writes go to a
//! temporary name and rename into place so a crashed put never leaves a
//! half-written record.

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::reply::domain::{EntryId, EntryRecord};
use crate::reply::ports::{EntryStore, EntryStoreError, EntryStoreResult};

/// Entry store persisting each record as `<uuid>.json` in one directory.
#[derive(Debug)]
pub struct FsEntryStore {
    dir: Dir,
}

impl FsEntryStore {
    /// Creates a store over an already-opened capability directory.
    #[must_use]
    pub const fn new(dir: Dir) -> Self {
        Self { dir }
    }

    /// Opens a store rooted at `path` using ambient authority.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when the directory cannot be opened.
    pub fn open_ambient(path: &str) -> std::io::Result<Self> {
        Ok(Self::new(Dir::open_ambient_dir(path, ambient_authority())?))
    }

    fn file_name(id: EntryId) -> String {
        format!("{id}.json")
    }
}

#[async_trait]
impl EntryStore for FsEntryStore {
    async fn get(&self, id: EntryId) -> EntryStoreResult<Option<EntryRecord>> {
        match self.dir.read_to_string(Self::file_name(id)) {
            Ok(text) => {
                let record =
                    serde_json::from_str(&text).map_err(EntryStoreError::persistence)?;
                Ok(Some(record))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(EntryStoreError::persistence(err)),
        }
    }

    async fn put(&self, record: &EntryRecord) -> EntryStoreResult<()> {
        let text = serde_json::to_string_pretty(record).map_err(EntryStoreError::persistence)?;
        let final_name = Self::file_name(record.id());
        let temp_name = format!("{final_name}.tmp");
        self.dir
            .write(&temp_name, text.as_bytes())
            .map_err(EntryStoreError::persistence)?;
        self.dir
            .rename(&temp_name, &self.dir, &final_name)
            .map_err(EntryStoreError::persistence)?;
        Ok(())
    }
}
