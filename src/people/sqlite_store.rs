//! SQLite implementation of PeopleStorage

use log::info;
use rusqlite::{params, Connection};

use crate::database::Database;
use crate::error::StoreError;
use crate::people::{NewPerson, PeopleStorage, PersonRecord};

/// SQLite implementation of PeopleStorage
pub struct SQLitePeopleStore {
    db: Database,
}

impl SQLitePeopleStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn select_people(conn: &Connection) -> Result<Vec<PersonRecord>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, first_name, last_name FROM people ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(PersonRecord {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
        })
    })?;

    let mut people = Vec::new();
    for row in rows {
        people.push(row?);
    }
    Ok(people)
}

impl PeopleStorage for SQLitePeopleStore {
    fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError> {
        self.db.with_conn(|conn| select_people(conn))
    }

    fn create_person(&self, person: &NewPerson) -> Result<PersonRecord, StoreError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO people (first_name, last_name) VALUES (?1, ?2)",
                params![person.first_name, person.last_name],
            )?;
            Ok(PersonRecord {
                id: conn.last_insert_rowid(),
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
            })
        })
    }

    fn replace_all(&self, people: &[NewPerson]) -> Result<Vec<PersonRecord>, StoreError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            let removed = tx.execute("DELETE FROM people", [])?;
            {
                let mut insert =
                    tx.prepare("INSERT INTO people (first_name, last_name) VALUES (?1, ?2)")?;
                for person in people {
                    insert.execute(params![person.first_name, person.last_name])?;
                }
            }
            tx.commit()?;
            info!("Replaced {} people with {} rows", removed, people.len());

            select_people(conn)
        })
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        self.db.with_conn(|conn| Ok(conn.execute("DELETE FROM people", [])?))
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.db.ping()
    }
}
