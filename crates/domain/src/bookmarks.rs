//! Bookmark set: ordered medicine ids, unique, insertion order preserved.

use serde::{Deserialize, Serialize};

use crate::catalog::MedicineId;

/// Per-scope set of bookmarked medicine ids.
///
/// Serializes transparently as the id array, matching the stored shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkSet {
    ids: Vec<MedicineId>,
}

impl BookmarkSet {
    /// Creates an empty bookmark set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an id. Idempotent: returns false if it was already present.
    pub fn add(&mut self, id: MedicineId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes an id. Idempotent: returns false if it was not present.
    pub fn remove(&mut self, id: &MedicineId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    /// Returns true if the id is bookmarked.
    pub fn contains(&self, id: &MedicineId) -> bool {
        self.ids.contains(id)
    }

    /// Returns the ids in insertion order.
    pub fn ids(&self) -> &[MedicineId] {
        &self.ids
    }

    /// Returns true if nothing is bookmarked.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of bookmarked ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
