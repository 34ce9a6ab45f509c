use std::collections::HashSet;

use crate::contract::model::User;
use crate::domain::error::DomainError;

/// Records that carry a stable identity.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered in-memory collection of records with unique ids.
///
/// Created records are appended, edits replace in place, deletes remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityStore<R> {
    records: Vec<R>,
}

impl<R> Default for EntityStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Identified> EntityStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection.
    ///
    /// The incoming records are checked for duplicate ids first; on failure the
    /// current collection is left as it was.
    pub fn load(&mut self, records: Vec<R>) -> Result<(), DomainError> {
        if let Some(dup) = first_duplicate_id(&records) {
            return Err(DomainError::duplicate_id(dup));
        }
        self.records = records;
        Ok(())
    }

    pub fn insert(&mut self, record: R) -> Result<(), DomainError> {
        if self.contains(record.id()) {
            return Err(DomainError::duplicate_id(record.id()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Substitute the record stored under `id`, keeping its position.
    ///
    /// The replacement must keep the same id.
    pub fn replace(&mut self, id: &str, record: R) -> Result<(), DomainError> {
        let pos = self.position(id).ok_or_else(|| DomainError::not_found(id))?;
        if record.id() != id && self.contains(record.id()) {
            return Err(DomainError::duplicate_id(record.id()));
        }
        self.records[pos] = record;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<R, DomainError> {
        let pos = self.position(id).ok_or_else(|| DomainError::not_found(id))?;
        Ok(self.records.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

fn first_duplicate_id<R: Identified>(records: &[R]) -> Option<String> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .find(|r| !seen.insert(r.id()))
        .map(|r| r.id().to_string())
}
