use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::references::RefOption;
use crate::model::record::RecordId;

/// Ordered records of one entity type, unique by id.
///
/// Insertion order is kept for display only; sorting happens in the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// Active/total tally shown on the shell stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionStats {
    pub total: usize,
    pub active: usize,
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection, dropping later duplicates of an id.
    pub fn from_records(records: Vec<T>) -> Self {
        let mut collection = Self::new();
        for record in records {
            if !collection.contains(record.id()) {
                collection.records.push(record);
            }
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            total: self.records.len(),
            active: self.records.iter().filter(|r| r.is_active()).count(),
        }
    }

    /// Options for reference dropdowns in sibling editors.
    pub fn ref_options(&self) -> Vec<RefOption> {
        self.records
            .iter()
            .map(|record| RefOption {
                id: record.id().clone(),
                label: record.display_name().to_string(),
            })
            .collect()
    }

    pub(crate) fn get_mut(&mut self, id: &RecordId) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    pub(crate) fn push(&mut self, record: T) {
        self.records.push(record);
    }

    /// Removes `id` if present; returns whether anything was removed.
    pub(crate) fn remove(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        before != self.records.len()
    }
}
