use std::path::PathBuf;

use crate::error::CoreError;
use crate::model::{BirthMoment, Person};

use super::{read_json_locked, update_json_locked};

/// Named birth records, matched by case-insensitive name.
#[derive(Debug, Clone)]
pub struct PeopleStore {
    path: PathBuf,
}

impl PeopleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn list(&self) -> Result<Vec<Person>, CoreError> {
        read_json_locked(&self.path)
    }

    pub fn get(&self, name: &str) -> Result<Person, CoreError> {
        self.list()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::PersonNotFound {
                name: name.to_string(),
            })
    }

    /// Add a person. With `replace` an existing record of the same name is overwritten.
    pub fn add(&self, name: &str, birth: BirthMoment, replace: bool) -> Result<Person, CoreError> {
        let person = Person {
            name: name.to_string(),
            birth,
        };
        update_json_locked(&self.path, |people: &mut Vec<Person>| {
            let existing = people
                .iter()
                .position(|p| p.name.eq_ignore_ascii_case(name));
            match existing {
                Some(_) if !replace => {
                    return Err(CoreError::PersonExists {
                        name: name.to_string(),
                    })
                }
                Some(i) => people[i] = person.clone(),
                None => people.push(person.clone()),
            }
            Ok(())
        })?;
        Ok(person)
    }

    pub fn remove(&self, name: &str) -> Result<Person, CoreError> {
        update_json_locked(&self.path, |people: &mut Vec<Person>| {
            let index = people
                .iter()
                .position(|p| p.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| CoreError::PersonNotFound {
                    name: name.to_string(),
                })?;
            Ok(people.remove(index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn birth(date: &str) -> BirthMoment {
        BirthMoment::parse(date, Some("09:15")).unwrap()
    }

    #[test]
    fn test_add_get_remove() {
        let tmp = TempDir::new().unwrap();
        let store = PeopleStore::new(tmp.path().join("people.json"));

        store.add("Alice", birth("1990-01-02"), false).unwrap();
        store.add("Bob", birth("1988-05-06"), false).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(store.get("alice").unwrap().birth, birth("1990-01-02"));

        store.remove("ALICE").unwrap();
        assert!(matches!(
            store.get("Alice"),
            Err(CoreError::PersonNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_requires_replace() {
        let tmp = TempDir::new().unwrap();
        let store = PeopleStore::new(tmp.path().join("people.json"));
        store.add("Cara", birth("1991-01-01"), false).unwrap();
        assert!(matches!(
            store.add("cara", birth("1992-02-02"), false),
            Err(CoreError::PersonExists { .. })
        ));
        store.add("cara", birth("1992-02-02"), true).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.get("Cara").unwrap().birth, birth("1992-02-02"));
    }

    #[test]
    fn test_concurrent_adds_are_kept() {
        let tmp = TempDir::new().unwrap();
        let store = PeopleStore::new(tmp.path().join("people.json"));
        std::thread::scope(|scope| {
            for t in 0..6 {
                let store = &store;
                scope.spawn(move || {
                    for i in 0..10 {
                        store
                            .add(&format!("p{t}-{i}"), birth("1990-01-02"), false)
                            .unwrap();
                    }
                });
            }
        });
        assert_eq!(store.list().unwrap().len(), 60);
    }

    #[test]
    fn test_remove_missing_leaves_file() {
        let tmp = TempDir::new().unwrap();
        let store = PeopleStore::new(tmp.path().join("people.json"));
        store.add("Dana", birth("1993-03-03"), false).unwrap();
        assert!(matches!(
            store.remove("Eve"),
            Err(CoreError::PersonNotFound { .. })
        ));
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
