//! File Record Storage Abstraction
//!
//! Uploaded files are stored as whole records (metadata plus base64 content)
//! behind the [`FileStorage`] trait, so the HTTP layer works the same whether
//! records live in SQLite or in the in-memory mock store.

pub mod sqlite_store;
pub mod mock_store;


use std::cmp::Ordering;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::content::decode_data_url;
use crate::error::{ApiError, StoreError};

/// Upper bound on `size`, 5 MiB
pub const MAX_FILE_SIZE: i64 = 5 * 1024 * 1024;

/// Media types the server accepts
pub const ALLOWED_TYPES: [&str; 2] = ["text/plain", "application/pdf"];

/// A persisted file record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: i64,
    /// Data-URL encoded file bytes, stored verbatim
    pub content: String,
    pub section: String,
    pub created_at: DateTime<Utc>,
}

/// A validated file waiting for the store to assign `id` and `createdAt`
#[derive(Debug, Clone, PartialEq)]
pub struct NewFile {
    pub name: String,
    pub file_type: String,
    pub size: i64,
    pub content: String,
    pub section: String,
}

/// Upload body as received from the client. Every field is optional so that
/// missing ones surface as validation errors rather than parse errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileDraft {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    /// Any JSON number; fractional or oversized values are judged in `validate`
    pub size: Option<serde_json::Number>,
    pub content: Option<String>,
    pub section: Option<String>,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

impl FileDraft {
    /// Check required fields, the size ceiling and the media type
    pub fn validate(self) -> Result<NewFile, ApiError> {
        let (Some(name), Some(file_type), Some(content), Some(section), Some(size)) = (
            present(self.name),
            present(self.file_type),
            present(self.content),
            present(self.section),
            self.size,
        ) else {
            return Err(ApiError::Validation("Missing required fields".to_string()));
        };

        let size = declared_size(&size)?;
        // Both the declared and the decoded size must fit under the ceiling.
        let decoded = decode_data_url(&content)
            .map_err(|_| ApiError::Validation("File content must be a base64 data URL".to_string()))?;
        let actual = decoded.bytes.len() as i64;
        if actual > MAX_FILE_SIZE {
            return Err(ApiError::PayloadTooLarge { size: actual, limit: MAX_FILE_SIZE });
        }
        if !ALLOWED_TYPES.contains(&file_type.as_str()) {
            return Err(ApiError::Validation(format!(
                "Unsupported file type: {}. Allowed types: {}",
                file_type,
                ALLOWED_TYPES.join(", ")
            )));
        }

        Ok(NewFile { name, file_type, size, content, section })
    }
}

// Ceiling is checked before integrality: `6e6` is too large, `4.5` is malformed.
fn declared_size(size: &serde_json::Number) -> Result<i64, ApiError> {
    let value = size.as_i64().map(|n| n as f64).or_else(|| size.as_f64()).unwrap_or(f64::MAX);
    if value < 0.0 {
        return Err(ApiError::Validation("File size must not be negative".to_string()));
    }
    if value > MAX_FILE_SIZE as f64 {
        return Err(ApiError::PayloadTooLarge {
            size: value.min(i64::MAX as f64) as i64,
            limit: MAX_FILE_SIZE,
        });
    }
    if value.fract() != 0.0 {
        return Err(ApiError::Validation("File size must be a whole number of bytes".to_string()));
    }
    Ok(value as i64)
}

/// Listing order: newest `created_at` first, higher id first on equal timestamps
pub fn newest_first(a: &FileRecord, b: &FileRecord) -> Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

/// Creation timestamp, truncated to the microsecond precision SQLite stores
pub(crate) fn creation_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Trait defining the file record storage interface
pub trait FileStorage: Send + Sync {
    /// All records, optionally restricted to one section, newest first
    fn list_files(&self, section: Option<&str>) -> Result<Vec<FileRecord>, StoreError>;

    /// Fetch one record by id
    fn get_file(&self, id: i64) -> Result<FileRecord, StoreError>;

    /// Persist a record, assigning its id and creation time
    fn create_file(&self, file: &NewFile) -> Result<FileRecord, StoreError>;

    /// Remove a record; `StoreError::NotFound` when the id is unknown
    fn delete_file(&self, id: i64) -> Result<(), StoreError>;

    /// Check the backend is reachable
    fn ping(&self) -> Result<(), StoreError>;
}
