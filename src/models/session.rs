//! Session state
//!
//! A `Session` is the state that survives between interactions of one user:
//! the `SessionMirror` of entries added so far and the hits of the most
//! recent search. The mirror is a log of what this session did, not a cache
//! of the store; entries are tracked by the key the store assigned so a
//! remote delete can be matched exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemKey, ListEntry, Money, ProductHit, SessionId};

/// An entry added during this session, with where it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirroredEntry {
    pub folder: String,
    pub key: ItemKey,
    pub entry: ListEntry,
}

/// Session-scoped append log of added entries plus their running total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMirror {
    #[serde(default)]
    entries: Vec<MirroredEntry>,
    #[serde(default)]
    running_total: Money,
}

impl SessionMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry that the store accepted under `folder/key`
    pub fn record(&mut self, folder: impl Into<String>, key: ItemKey, entry: ListEntry) {
        self.running_total += entry.price_normalized();
        self.entries.push(MirroredEntry {
            folder: folder.into(),
            key,
            entry,
        });
    }

    /// Drop the entry stored under `folder/key`, if this session added it
    pub fn forget(&mut self, folder: &str, key: &ItemKey) -> Option<MirroredEntry> {
        let position = self
            .entries
            .iter()
            .position(|m| m.folder == folder && &m.key == key)?;
        let removed = self.entries.remove(position);
        self.running_total -= removed.entry.price_normalized();
        Some(removed)
    }

    pub fn entries(&self) -> &[MirroredEntry] {
        &self.entries
    }

    pub fn running_total(&self) -> Money {
        self.running_total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything one user session carries between interactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub mirror: SessionMirror,
    /// Hits of the most recent search, in display order
    #[serde(default)]
    pub last_search: Vec<ProductHit>,
    /// Folder new items go to when none is named
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_folder: Option<String>,
}

impl Session {
    /// Start a fresh session with an empty mirror
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            started_at: now,
            updated_at: now,
            mirror: SessionMirror::new(),
            last_search: Vec::new(),
            selected_folder: None,
        }
    }

    /// Look up a hit of the last search by its 1-based position
    pub fn search_hit(&self, position: usize) -> Option<&ProductHit> {
        position
            .checked_sub(1)
            .and_then(|index| self.last_search.get(index))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
