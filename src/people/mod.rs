//! Person Record Storage Abstraction

pub mod sqlite_store;
pub mod mock_store;

#[cfg(test)]
mod comprehensive_test;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, StoreError};

/// Rows written by `populate`, in insertion order
pub const SAMPLE_PEOPLE: [(&str, &str); 3] = [("John", "Doe"), ("Jane", "Smith"), ("Bob", "Johnson")];

/// A persisted person
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// A validated person waiting for an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
}

impl NewPerson {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

/// The canonical sample set
pub fn sample_people() -> Vec<NewPerson> {
    SAMPLE_PEOPLE
        .iter()
        .map(|(first, last)| NewPerson::new(first, last))
        .collect()
}

/// POST body for the people endpoint: either a person or `{"action": "populate"}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub action: Option<String>,
}

impl PersonDraft {
    pub fn validate(self) -> Result<NewPerson, ApiError> {
        match (self.first_name, self.last_name) {
            (Some(first_name), Some(last_name)) if !first_name.is_empty() && !last_name.is_empty() => {
                Ok(NewPerson { first_name, last_name })
            }
            _ => Err(ApiError::Validation(
                "Missing required fields: firstName and lastName".to_string(),
            )),
        }
    }
}

/// Trait defining the person storage interface
pub trait PeopleStorage: Send + Sync {
    /// All people ordered by id ascending
    fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError>;

    fn create_person(&self, person: &NewPerson) -> Result<PersonRecord, StoreError>;

    /// Atomically replace the whole set and return the new rows
    fn replace_all(&self, people: &[NewPerson]) -> Result<Vec<PersonRecord>, StoreError>;

    /// Remove everyone, returning how many rows were removed
    fn delete_all(&self) -> Result<usize, StoreError>;

    fn ping(&self) -> Result<(), StoreError>;
}
