//! Stacking order for mounted cards.
//!
//! Every mounted card has an entry holding its z-index and whether it is being
//! dragged. Raising a card gives it `max_z()`; once values drift past
//! `len + 1` the registry compacts itself back to a contiguous `1..=len` with
//! the raised card on top, so z-indices stay bounded no matter how many raises
//! happen in a session.
//!
//! Changes are returned as [`ZChange`]s rather than applied anywhere, leaving
//! the host to push each one to its element exactly once.

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::collection::CardId;

/// Stacking state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZEntry {
    /// Stacking rank; higher draws on top. Always `>= 1`.
    pub z: u32,
    /// True between drag start and drag end.
    pub dragging: bool,
}

impl Default for ZEntry {
    fn default() -> Self {
        Self { z: 1, dragging: false }
    }
}

/// A z-index the host must apply to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZChange {
    pub id: CardId,
    pub z: u32,
}

/// Registry of z-order entries, kept in registration order.
///
/// Registration order breaks ties when several cards share a z-index.
#[derive(Debug, Clone, Default)]
pub struct ZOrder {
    entries: Vec<(CardId, ZEntry)>,
}

impl ZOrder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` at z 1. Returns false if it was already registered.
    pub fn register(&mut self, id: &str) -> bool {
        if self.position(id).is_some() {
            return false;
        }
        self.entries.push((id.to_owned(), ZEntry::default()));
        true
    }

    /// Remove `id`, returning its last entry.
    pub fn unregister(&mut self, id: &str) -> Option<ZEntry> {
        let index = self.position(id)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<ZEntry> {
        self.position(id).map(|i| self.entries[i].1)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One above the highest z-index, or 1 when empty.
    #[must_use]
    pub fn max_z(&self) -> u32 {
        self.entries.iter().map(|(_, e)| e.z).max().map_or(1, |z| z + 1)
    }

    /// Move `id` to `forced_z`, or to [`max_z`](Self::max_z) when `None`.
    ///
    /// When the new value exceeds `len + 1` the registry is compacted with
    /// `id` excluded, which leaves `id` at exactly `len`. Unknown ids produce
    /// no changes.
    pub fn raise_to_top(&mut self, id: &str, forced_z: Option<u32>) -> Vec<ZChange> {
        let Some(index) = self.position(id) else {
            return Vec::new();
        };
        let new_z = forced_z.unwrap_or_else(|| self.max_z()).max(1);
        self.entries[index].1.z = new_z;
        trace!(card_id = %id, z = new_z, "raised card");

        let mut changes = vec![ZChange { id: id.to_owned(), z: new_z }];
        if u64::from(new_z) > self.entries.len() as u64 + 1 {
            for change in self.compact(Some(id)) {
                if let Some(existing) = changes.iter_mut().find(|c| c.id == change.id) {
                    existing.z = change.z;
                } else {
                    changes.push(change);
                }
            }
        }
        changes
    }

    /// Renumber every entry to `1..=len` in ascending z order.
    ///
    /// The sort is stable, so equal z-indices keep registration order. When
    /// `excluded` names a registered card it is skipped during renumbering and
    /// then placed at `len`, above every other entry. Returns only the entries
    /// whose z-index actually changed.
    pub fn compact(&mut self, excluded: Option<&str>) -> Vec<ZChange> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by_key(|&i| self.entries[i].1.z);

        let excluded_index = excluded.and_then(|id| self.position(id));
        let mut changes = Vec::new();
        let mut next_z: u32 = 1;
        for i in order {
            if Some(i) == excluded_index {
                continue;
            }
            self.assign(i, next_z, &mut changes);
            next_z += 1;
        }
        if let Some(i) = excluded_index {
            self.assign(i, next_z, &mut changes);
        }
        changes
    }

    /// Set the drag flag for `id`. Returns false if `id` is unknown.
    pub fn set_dragging(&mut self, id: &str, dragging: bool) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.entries[index].1.dragging = dragging;
        true
    }

    /// Clear every drag flag, e.g. once drag inertia has settled.
    pub fn clear_dragging(&mut self) {
        for (_, entry) in &mut self.entries {
            entry.dragging = false;
        }
    }

    #[must_use]
    pub fn is_dragging(&self, id: &str) -> bool {
        self.get(id).is_some_and(|e| e.dragging)
    }

    /// Registered ids from bottom to top.
    #[must_use]
    pub fn stacking_order(&self) -> Vec<&str> {
        let mut order: Vec<&(CardId, ZEntry)> = self.entries.iter().collect();
        order.sort_by_key(|(_, e)| e.z);
        order.into_iter().map(|(id, _)| id.as_str()).collect()
    }

    fn assign(&mut self, index: usize, z: u32, changes: &mut Vec<ZChange>) {
        let (id, entry) = &mut self.entries[index];
        if entry.z != z {
            entry.z = z;
            changes.push(ZChange { id: id.clone(), z });
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(entry_id, _)| entry_id == id)
    }
}
