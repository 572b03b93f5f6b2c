//! Person repository

use std::sync::Arc;

use log::info;
use serde::Serialize;

use crate::error::ApiError;
use crate::people::{sample_people, PeopleStorage, PersonDraft, PersonRecord};
use crate::service::StoreExecutor;

/// Outcome of a populate request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PopulateResult {
    pub count: usize,
    pub people: Vec<PersonRecord>,
}

pub struct PeopleService {
    store: Arc<dyn PeopleStorage>,
    executor: StoreExecutor,
}

impl PeopleService {
    pub fn new(store: Arc<dyn PeopleStorage>, executor: StoreExecutor) -> Self {
        Self { store, executor }
    }

    pub async fn list(&self) -> Result<Vec<PersonRecord>, ApiError> {
        let store = Arc::clone(&self.store);
        self.executor.run(move || store.list_people()).await
    }

    pub async fn create(&self, draft: PersonDraft) -> Result<PersonRecord, ApiError> {
        let person = draft.validate()?;
        let store = Arc::clone(&self.store);
        let record = self.executor.run(move || store.create_person(&person)).await?;
        info!("Created person id={}", record.id);
        Ok(record)
    }

    /// Replace everyone with the sample set. Destructive: prior rows are not kept.
    pub async fn populate(&self) -> Result<PopulateResult, ApiError> {
        let store = Arc::clone(&self.store);
        let people = self
            .executor
            .run(move || store.replace_all(&sample_people()))
            .await?;
        info!("Populated people table with {} sample rows", people.len());
        Ok(PopulateResult {
            count: people.len(),
            people,
        })
    }

    /// Remove everyone and report how many rows went
    pub async fn clear(&self) -> Result<usize, ApiError> {
        let store = Arc::clone(&self.store);
        let deleted = self.executor.run(move || store.delete_all()).await?;
        info!("Deleted {} people", deleted);
        Ok(deleted)
    }

    pub async fn ping(&self) -> Result<(), ApiError> {
        let store = Arc::clone(&self.store);
        self.executor.run(move || store.ping()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::mock_store::MockPeopleStore;
    use std::time::Duration;

    fn service() -> PeopleService {
        PeopleService::new(
            Arc::new(MockPeopleStore::new()),
            StoreExecutor::new(Duration::from_secs(2), false),
        )
    }

    #[actix_web::test]
    async fn test_populate_then_clear() {
        let service = service();
        service
            .create(PersonDraft {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                action: None,
            })
            .await
            .unwrap();

        let populated = service.populate().await.unwrap();
        assert_eq!(populated.count, 3);
        assert_eq!(populated.people, service.list().await.unwrap());

        assert_eq!(service.clear().await.unwrap(), 3);
        assert_eq!(service.clear().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_create_requires_both_names() {
        let service = service();
        let result = service
            .create(PersonDraft {
                first_name: Some("Ada".to_string()),
                last_name: None,
                action: None,
            })
            .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(service.list().await.unwrap().is_empty());
    }
}
