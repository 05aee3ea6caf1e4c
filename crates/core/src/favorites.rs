//! Favorite flag bookkeeping with optimistic updates.
//!
//! The ledger is the single source of truth for an outfit's favorite flag on
//! the client: the last value confirmed by the store, plus at most one
//! in-flight toggle per outfit. A second toggle for the same outfit while
//! one is pending is rejected rather than racing the first.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    remote: bool,
    pending: Option<bool>,
}

/// Handle for an in-flight toggle; pass it back to [`FavoriteLedger::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PendingToggle {
    pub outfit_id: DbId,
    pub desired: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FavoriteLedger {
    entries: HashMap<DbId, Entry>,
}

impl FavoriteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value shown to the user: the pending value if a toggle is in flight,
    /// otherwise the last confirmed value. Unknown outfits are not favorites.
    pub fn is_favorite(&self, outfit_id: DbId) -> bool {
        self.entries
            .get(&outfit_id)
            .map(|e| e.pending.unwrap_or(e.remote))
            .unwrap_or(false)
    }

    pub fn is_pending(&self, outfit_id: DbId) -> bool {
        self.entries
            .get(&outfit_id)
            .is_some_and(|e| e.pending.is_some())
    }

    /// Start an optimistic toggle.
    pub fn begin_toggle(&mut self, outfit_id: DbId) -> Result<PendingToggle, CoreError> {
        let entry = self.entries.entry(outfit_id).or_insert(Entry {
            remote: false,
            pending: None,
        });
        if entry.pending.is_some() {
            return Err(CoreError::Conflict(format!(
                "A favorite update for outfit {outfit_id} is already in progress"
            )));
        }
        let desired = !entry.remote;
        entry.pending = Some(desired);
        Ok(PendingToggle { outfit_id, desired })
    }

    /// Finish a toggle: commit on success, roll back on failure.
    pub fn complete(&mut self, toggle: PendingToggle, succeeded: bool) {
        if let Some(entry) = self.entries.get_mut(&toggle.outfit_id) {
            if entry.pending == Some(toggle.desired) {
                if succeeded {
                    entry.remote = toggle.desired;
                }
                entry.pending = None;
            }
        }
    }

    /// Replace confirmed values with a fresh fetch. Outfits absent from the
    /// fetch are forgotten unless a toggle is still in flight for them.
    pub fn reconcile(&mut self, remote: impl IntoIterator<Item = (DbId, bool)>) {
        let fetched: HashMap<DbId, bool> = remote.into_iter().collect();

        self.entries
            .retain(|id, entry| fetched.contains_key(id) || entry.pending.is_some());

        for (id, is_favorite) in fetched {
            self.entries
                .entry(id)
                .and_modify(|e| e.remote = is_favorite)
                .or_insert(Entry {
                    remote: is_favorite,
                    pending: None,
                });
        }
    }

    /// Ids currently shown as favorites.
    pub fn favorites(&self) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self
            .entries
            .keys()
            .copied()
            .filter(|id| self.is_favorite(*id))
            .collect();
        ids.sort();
        ids
    }
}
