//! Per-entity selection state: pin flags and the latest movement score.

use chronograph_types::EntityId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub pinned: bool,
    pub score: f64,
}

/// Insertion-ordered mapping from entity ID to its selection entry.
///
/// # Examples
///
/// ```
/// use chronograph::Selection;
///
/// let mut selection = Selection::from_ids(["a", "b", "c"]);
/// selection.pin("c");
/// selection.pin("a");
///
/// let pinned: Vec<&str> = selection.pinned_ids().map(|id| id.as_str()).collect();
/// assert_eq!(pinned, vec!["a", "c"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    entries: Vec<(EntityId, SelectionEntry)>,
    index: FxHashMap<EntityId, usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unpinned, zero-score entries for each ID, in order. Duplicates are ignored.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EntityId>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.insert(id.into());
        }
        selection
    }

    /// Register an ID if absent and return its entry.
    pub fn insert(&mut self, id: EntityId) -> &mut SelectionEntry {
        let slot = match self.index.get(&id) {
            Some(&slot) => slot,
            None => {
                self.entries.push((id.clone(), SelectionEntry::default()));
                self.index.insert(id, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get(&self, id: &str) -> Option<&SelectionEntry> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut SelectionEntry> {
        self.index.get(id).map(|&i| &mut self.entries[i].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.get(id).is_some_and(|e| e.pinned)
    }

    /// Flip the pin flag. Returns the new state, or `None` for an unknown ID.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let entry = self.get_mut(id)?;
        entry.pinned = !entry.pinned;
        Some(entry.pinned)
    }

    /// Returns `false` for an unknown ID.
    pub fn pin(&mut self, id: &str) -> bool {
        self.set_pinned(id, true)
    }

    /// Returns `false` for an unknown ID.
    pub fn unpin(&mut self, id: &str) -> bool {
        self.set_pinned(id, false)
    }

    fn set_pinned(&mut self, id: &str, pinned: bool) -> bool {
        match self.get_mut(id) {
            Some(entry) => {
                entry.pinned = pinned;
                true
            }
            None => false,
        }
    }

    pub fn clear_pins(&mut self) {
        for (_, entry) in &mut self.entries {
            entry.pinned = false;
        }
    }

    pub fn set_score(&mut self, id: &str, score: f64) -> bool {
        match self.get_mut(id) {
            Some(entry) => {
                entry.score = score;
                true
            }
            None => false,
        }
    }

    pub fn pinned_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.entries
            .iter()
            .filter(|(_, e)| e.pinned)
            .map(|(id, _)| id)
    }

    pub fn pinned_count(&self) -> usize {
        self.entries.iter().filter(|(_, e)| e.pinned).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &SelectionEntry)> {
        self.entries.iter().map(|(id, e)| (id, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
