//! Shared free-text search query.
//!
//! `State` owns the single `SearchContext` and lends it out by reference. The
//! nav bar search input is its writer, including Esc to clear it. The list
//! view reads it on every render and clears it on reload. Nothing else writes
//! to it.

/// Current search query shared by the nav bar and the list view.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchContext {
    query: String,
}

impl SearchContext {
    /// Return the raw query as typed.
    ///
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query.
    ///
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Append a typed character.
    ///
    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character.
    ///
    pub fn pop(&mut self) {
        self.query.pop();
    }

    /// Reset to the empty query.
    ///
    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Whether the query is blank once trimmed.
    ///
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}
