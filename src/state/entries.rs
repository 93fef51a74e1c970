//! Cached entries and their load state.
//!
//! The list mirrors what the server is assumed to hold. It is rebuilt
//! wholesale on load and otherwise reconciled from mutation responses without
//! re-fetching, so it can drift if the server stores something other than what
//! it echoes back.

use crate::tracker::{Entry, EntryId};

/// Lifecycle of the cached collection.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    LoadFailed(String),
}

/// Houses the cached entries list.
///
#[derive(Clone, Debug, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    load: LoadState,
}

impl EntryStore {
    /// Return the cached entries in server order.
    ///
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Return the current load state.
    ///
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Return the load error message, if the last load failed.
    ///
    pub fn load_error(&self) -> Option<&str> {
        match &self.load {
            LoadState::LoadFailed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a load is in flight.
    ///
    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    /// Enter the loading state, clearing any previous error.
    ///
    pub fn begin_load(&mut self) -> &mut Self {
        self.load = LoadState::Loading;
        self
    }

    /// Apply the outcome of a full load. The list is replaced on success and
    /// left empty on failure.
    ///
    pub fn finish_load(&mut self, result: Result<Vec<Entry>, String>) -> &mut Self {
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.load = LoadState::Ready;
            }
            Err(message) => {
                self.entries.clear();
                self.load = LoadState::LoadFailed(message);
            }
        }
        self
    }

    /// Append a created entry.
    ///
    pub fn apply_created(&mut self, entry: Entry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Replace every entry with the updated entry's id.
    ///
    pub fn apply_updated(&mut self, entry: Entry) -> &mut Self {
        for existing in self.entries.iter_mut().filter(|e| e.id == entry.id) {
            *existing = entry.clone();
        }
        self
    }

    /// Remove every entry with the given id.
    ///
    pub fn apply_deleted(&mut self, id: &EntryId) -> &mut Self {
        self.entries.retain(|e| &e.id != id);
        self
    }

    /// Find the first entry with the given id.
    ///
    pub fn find(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }
}
