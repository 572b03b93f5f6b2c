//! Mock implementation of PeopleStorage

use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::people::{NewPerson, PeopleStorage, PersonRecord};

struct MockPeople {
    people: Vec<PersonRecord>,
    next_id: i64,
}

impl MockPeople {
    fn insert(&mut self, person: &NewPerson) -> PersonRecord {
        let record = PersonRecord {
            id: self.next_id,
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
        };
        self.next_id += 1;
        self.people.push(record.clone());
        record
    }

    // Bulk removal restarts numbering at 1.
    fn reset(&mut self) -> usize {
        let removed = self.people.len();
        self.people.clear();
        self.next_id = 1;
        removed
    }
}

/// In-memory people store
pub struct MockPeopleStore {
    state: Mutex<MockPeople>,
}

impl MockPeopleStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockPeople {
                people: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MockPeople>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for MockPeopleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PeopleStorage for MockPeopleStore {
    fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError> {
        let mut people = self.lock()?.people.clone();
        people.sort_by_key(|person| person.id);
        Ok(people)
    }

    fn create_person(&self, person: &NewPerson) -> Result<PersonRecord, StoreError> {
        Ok(self.lock()?.insert(person))
    }

    fn replace_all(&self, people: &[NewPerson]) -> Result<Vec<PersonRecord>, StoreError> {
        let mut state = self.lock()?;
        state.reset();
        Ok(people.iter().map(|person| state.insert(person)).collect())
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.reset())
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
