//! File repository: validates uploads and delegates to a FileStorage backend

use std::sync::Arc;

use log::{debug, info};

use crate::content::decode_data_url;
use crate::error::ApiError;
use crate::files::{FileDraft, FileRecord, FileStorage};
use crate::service::StoreExecutor;

pub struct FileService {
    store: Arc<dyn FileStorage>,
    executor: StoreExecutor,
}

impl FileService {
    /// Create a new file service with injected storage backend
    pub fn new(store: Arc<dyn FileStorage>, executor: StoreExecutor) -> Self {
        Self { store, executor }
    }

    /// Every file, or only those whose section matches exactly; newest first
    pub async fn list(&self, section: Option<String>) -> Result<Vec<FileRecord>, ApiError> {
        let store = Arc::clone(&self.store);
        let files = self
            .executor
            .run(move || store.list_files(section.as_deref()))
            .await?;
        debug!("Returning {} files", files.len());
        Ok(files)
    }

    pub async fn create(&self, draft: FileDraft) -> Result<FileRecord, ApiError> {
        let file = draft.validate()?;
        let store = Arc::clone(&self.store);
        let record = self.executor.run(move || store.create_file(&file)).await?;
        info!(
            "Stored file id={} name={} size={} section={}",
            record.id, record.name, record.size, record.section
        );
        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<FileRecord, ApiError> {
        let store = Arc::clone(&self.store);
        self.executor.run(move || store.get_file(id)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let store = Arc::clone(&self.store);
        self.executor.run(move || store.delete_file(id)).await?;
        info!("Deleted file id={}", id);
        Ok(())
    }

    /// Fetch a record and decode its content back into raw bytes
    pub async fn download(&self, id: i64) -> Result<(FileRecord, Vec<u8>), ApiError> {
        let record = self.get(id).await?;
        let decoded = decode_data_url(&record.content).map_err(|e| {
            self.executor
                .persistence(format!("stored content of file {} is unreadable: {}", id, e))
        })?;
        Ok((record, decoded.bytes))
    }

    pub async fn ping(&self) -> Result<(), ApiError> {
        let store = Arc::clone(&self.store);
        self.executor.run(move || store.ping()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::encode_data_url;
    use crate::error::StoreError;
    use crate::files::mock_store::MockFileStore;
    use crate::files::{NewFile, MAX_FILE_SIZE};
    use std::time::Duration;

    fn service() -> FileService {
        FileService::new(
            Arc::new(MockFileStore::new()),
            StoreExecutor::new(Duration::from_secs(2), false),
        )
    }

    fn draft(name: &str, section: &str, bytes: &[u8]) -> FileDraft {
        FileDraft {
            name: Some(name.to_string()),
            file_type: Some("text/plain".to_string()),
            size: Some((bytes.len() as i64).into()),
            content: Some(encode_data_url("text/plain", bytes)),
            section: Some(section.to_string()),
        }
    }

    #[actix_web::test]
    async fn test_create_list_delete() {
        let service = service();

        let created = service.create(draft("a.txt", "docs", b"alpha")).await.unwrap();
        let listed = service.list(Some("docs".to_string())).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        service.delete(created.id).await.unwrap();
        assert!(service.list(None).await.unwrap().is_empty());

        let again = service.delete(created.id).await;
        assert!(matches!(again, Err(ApiError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_create_rejects_invalid_drafts() {
        let service = service();

        let mut too_big = draft("big.txt", "docs", b"x");
        too_big.size = Some((MAX_FILE_SIZE + 1).into());
        assert!(matches!(
            service.create(too_big).await,
            Err(ApiError::PayloadTooLarge { .. })
        ));

        let mut no_section = draft("a.txt", "docs", b"x");
        no_section.section = None;
        assert!(matches!(service.create(no_section).await, Err(ApiError::Validation(_))));

        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_download_decodes_content() {
        let service = service();
        let bytes: Vec<u8> = (0..=255u8).collect();

        let created = service.create(draft("bytes.txt", "docs", &bytes)).await.unwrap();
        let (record, decoded) = service.download(created.id).await.unwrap();
        assert_eq!(record.id, created.id);
        assert_eq!(decoded, bytes);

        assert!(matches!(service.download(created.id + 100).await, Err(ApiError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_download_of_corrupt_content_is_persistence_error() {
        let store = Arc::new(MockFileStore::new());
        let record = store
            .create_file(&NewFile {
                name: "broken.txt".to_string(),
                file_type: "text/plain".to_string(),
                size: 1,
                content: "data:text/plain;base64,@@@".to_string(),
                section: "docs".to_string(),
            })
            .unwrap();

        let service = FileService::new(store, StoreExecutor::new(Duration::from_secs(2), false));
        assert!(matches!(
            service.download(record.id).await,
            Err(ApiError::Persistence { .. })
        ));
    }

    struct SlowStore;

    impl FileStorage for SlowStore {
        fn list_files(&self, _section: Option<&str>) -> Result<Vec<FileRecord>, StoreError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(Vec::new())
        }
        fn get_file(&self, id: i64) -> Result<FileRecord, StoreError> {
            Err(StoreError::NotFound { entity: "File", id })
        }
        fn create_file(&self, _file: &NewFile) -> Result<FileRecord, StoreError> {
            Err(StoreError::Poisoned)
        }
        fn delete_file(&self, id: i64) -> Result<(), StoreError> {
            Err(StoreError::NotFound { entity: "File", id })
        }
        fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[actix_web::test]
    async fn test_slow_store_times_out() {
        let service = FileService::new(
            Arc::new(SlowStore),
            StoreExecutor::new(Duration::from_millis(20), false),
        );
        assert!(matches!(service.list(None).await, Err(ApiError::Timeout(_))));
    }
}
