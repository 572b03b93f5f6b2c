//! Runs the people storage contract against every backend

#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;

    use crate::database::Database;
    use crate::people::mock_store::MockPeopleStore;
    use crate::people::sqlite_store::SQLitePeopleStore;
    use crate::people::{sample_people, NewPerson, PeopleStorage, SAMPLE_PEOPLE};

    fn backends() -> Vec<(&'static str, Arc<dyn PeopleStorage>)> {
        vec![
            ("mock", Arc::new(MockPeopleStore::new())),
            ("sqlite", Arc::new(SQLitePeopleStore::new(Database::open_in_memory().unwrap()))),
        ]
    }

    fn names(store: &Arc<dyn PeopleStorage>) -> Vec<(String, String)> {
        store
            .list_people()
            .unwrap()
            .into_iter()
            .map(|p| (p.first_name, p.last_name))
            .collect()
    }

    #[test]
    fn test_populate_yields_canonical_rows_regardless_of_prior_state() {
        let expected: Vec<(String, String)> = SAMPLE_PEOPLE
            .iter()
            .map(|(f, l)| (f.to_string(), l.to_string()))
            .collect();

        for (backend, store) in backends() {
            // empty table
            assert_eq!(store.replace_all(&sample_people()).unwrap().len(), 3, "{}", backend);
            assert_eq!(names(&store), expected, "{}", backend);

            // populated twice in a row
            store.replace_all(&sample_people()).unwrap();
            assert_eq!(names(&store), expected, "{}", backend);

            // extra rows are discarded
            store.create_person(&NewPerson::new("Grace", "Hopper")).unwrap();
            store.replace_all(&sample_people()).unwrap();
            assert_eq!(names(&store), expected, "{}", backend);

            assert_eq!(store.delete_all().unwrap(), 3, "{}: clear after populate", backend);
            assert!(store.list_people().unwrap().is_empty(), "{}", backend);
        }
    }

    #[test]
    fn test_listing_is_id_ascending() {
        for (backend, store) in backends() {
            for (first, last) in [("C", "C"), ("A", "A"), ("B", "B")] {
                store.create_person(&NewPerson::new(first, last)).unwrap();
            }
            let people = store.list_people().unwrap();
            assert!(people.windows(2).all(|w| w[0].id < w[1].id), "{}", backend);
            assert_eq!(people[0].first_name, "C", "{}", backend);
        }
    }
}
