//! Mock implementation of FileStorage for local development and tests

use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::files::{creation_timestamp, newest_first, FileRecord, FileStorage, NewFile};

struct MockFiles {
    files: Vec<FileRecord>,
    next_id: i64,
}

/// In-memory file store. Ids start at 1 and are never reused for the
/// lifetime of the store.
pub struct MockFileStore {
    state: Mutex<MockFiles>,
}

impl MockFileStore {
    /// Create a new, empty mock file store
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockFiles {
                files: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MockFiles>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Remove every record (useful for test cleanup)
    pub fn clear(&self) -> Result<(), StoreError> {
        self.lock()?.files.clear();
        Ok(())
    }

    /// Number of records currently held
    pub fn file_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.files.len())
    }
}

impl Default for MockFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorage for MockFileStore {
    fn list_files(&self, section: Option<&str>) -> Result<Vec<FileRecord>, StoreError> {
        let state = self.lock()?;
        let mut files: Vec<FileRecord> = state
            .files
            .iter()
            .filter(|file| section.map_or(true, |s| file.section == s))
            .cloned()
            .collect();
        files.sort_by(newest_first);
        Ok(files)
    }

    fn get_file(&self, id: i64) -> Result<FileRecord, StoreError> {
        let state = self.lock()?;
        state
            .files
            .iter()
            .find(|file| file.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "File", id })
    }

    fn create_file(&self, file: &NewFile) -> Result<FileRecord, StoreError> {
        let mut state = self.lock()?;
        let record = FileRecord {
            id: state.next_id,
            name: file.name.clone(),
            file_type: file.file_type.clone(),
            size: file.size,
            content: file.content.clone(),
            section: file.section.clone(),
            created_at: creation_timestamp(),
        };
        state.next_id += 1;
        state.files.push(record.clone());
        Ok(record)
    }

    fn delete_file(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let index = state
            .files
            .iter()
            .position(|file| file.id == id)
            .ok_or(StoreError::NotFound { entity: "File", id })?;
        state.files.remove(index);
        Ok(())
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
