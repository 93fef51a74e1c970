//! Client-side entry filtering.
//!
//! Filtering runs over the cached list on every render and never mutates it.

use crate::tracker::Entry;

/// Which entry field the search query is matched against.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum FilterField {
    #[default]
    All,
    Name,
    Status,
}

impl FilterField {
    /// Return the next selector, wrapping around.
    ///
    pub fn next(self) -> FilterField {
        match self {
            FilterField::All => FilterField::Name,
            FilterField::Name => FilterField::Status,
            FilterField::Status => FilterField::All,
        }
    }

    /// Return the on-screen label.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::All => "Status or Name",
            FilterField::Name => "Name",
            FilterField::Status => "Status",
        }
    }
}

/// Return the entries matching `query` on `field`, in list order.
///
/// A blank query matches everything. Matching is a case-insensitive substring
/// test against the employee name, the status label, or either for `All`.
pub fn filter_entries<'a>(entries: &'a [Entry], query: &str, field: FilterField) -> Vec<&'a Entry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| matches(entry, &needle, field))
        .collect()
}

fn matches(entry: &Entry, needle: &str, field: FilterField) -> bool {
    let name = || entry.employee_name.to_lowercase().contains(needle);
    let status = || entry.status.label().to_lowercase().contains(needle);
    match field {
        FilterField::Name => name(),
        FilterField::Status => status(),
        FilterField::All => name() || status(),
    }
}
