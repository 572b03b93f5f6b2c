//! SQLite implementation of FileStorage

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use crate::database::Database;
use crate::error::StoreError;
use crate::files::{creation_timestamp, FileRecord, FileStorage, NewFile};

const SELECT_COLUMNS: &str = "SELECT id, name, type, size, content, section, created_at FROM files";

/// SQLite implementation of FileStorage
pub struct SQLiteFileStore {
    db: Database,
}

impl SQLiteFileStore {
    /// Create a file store on top of an opened database
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

// Fixed-width RFC 3339 so that ORDER BY on the text column is chronological.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<FileRecord> {
    let created_at: String = row.get(6)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(FileRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        file_type: row.get(2)?,
        size: row.get(3)?,
        content: row.get(4)?,
        section: row.get(5)?,
        created_at,
    })
}

impl FileStorage for SQLiteFileStore {
    fn list_files(&self, section: Option<&str>) -> Result<Vec<FileRecord>, StoreError> {
        self.db.with_conn(|conn| {
            let sql = format!(
                "{} WHERE (?1 IS NULL OR section = ?1) ORDER BY created_at DESC, id DESC",
                SELECT_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![section], record_from_row)?;

            let mut files = Vec::new();
            for row in rows {
                files.push(row?);
            }
            debug!("Listed {} files (section filter: {:?})", files.len(), section);
            Ok(files)
        })
    }

    fn get_file(&self, id: i64) -> Result<FileRecord, StoreError> {
        self.db.with_conn(|conn| {
            let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
            conn.query_row(&sql, params![id], record_from_row)
                .optional()?
                .ok_or(StoreError::NotFound { entity: "File", id })
        })
    }

    fn create_file(&self, file: &NewFile) -> Result<FileRecord, StoreError> {
        let created_at = creation_timestamp();
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO files (name, type, size, content, section, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    file.name,
                    file.file_type,
                    file.size,
                    file.content,
                    file.section,
                    format_timestamp(&created_at)
                ],
            )?;

            Ok(FileRecord {
                id: conn.last_insert_rowid(),
                name: file.name.clone(),
                file_type: file.file_type.clone(),
                size: file.size,
                content: file.content.clone(),
                section: file.section.clone(),
                created_at,
            })
        })
    }

    fn delete_file(&self, id: i64) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM files WHERE id = ?1", params![id])?;
            if deleted == 0 {
                return Err(StoreError::NotFound { entity: "File", id });
            }
            Ok(())
        })
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.db.ping()
    }
}
