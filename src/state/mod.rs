//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - The cached entries list and its load state
//! - The shared search query
//! - Navigation and form editing types
//! - Toast notifications
//! - State error handling

mod entries;
mod error;
mod form;
mod navigation;
mod notification;
mod search;

pub use entries::{EntryStore, LoadState};
pub use error::StateError;
pub use form::{EntryForm, FormField, DATE_FORMAT};
pub use navigation::View;
pub use notification::{Notification, NotificationKind, Notifications};
pub use search::SearchContext;

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
