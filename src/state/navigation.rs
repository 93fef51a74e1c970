//! Navigation-related state types.
//!
//! This module contains the views that can sit on the view stack.

use crate::tracker::EntryId;

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum View {
    EntryList,
    CreateEntry,
    EditEntry(EntryId),
}

impl View {
    /// Whether the view hosts an entry form.
    ///
    pub fn is_form(&self) -> bool {
        matches!(self, View::CreateEntry | View::EditEntry(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view() {
        assert_eq!(View::EntryList, View::EntryList);
        assert_eq!(
            View::EditEntry(EntryId::Number(1)),
            View::EditEntry(EntryId::Number(1))
        );
        assert_ne!(
            View::EditEntry(EntryId::Number(1)),
            View::EditEntry(EntryId::Number(2))
        );
    }

    #[test]
    fn test_is_form() {
        assert!(!View::EntryList.is_form());
        assert!(View::CreateEntry.is_form());
        assert!(View::EditEntry(EntryId::Text("x".to_owned())).is_form());
    }
}
