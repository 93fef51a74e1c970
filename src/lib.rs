//! Terminal client for employee task records kept in a REST entries store.
//!
//! The crate is split into the resource client (`tracker`), the cached entry
//! store and view state (`state`), the event handlers that connect them
//! (`events`), and the `ratatui` views (`ui`).

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod tracker;
pub mod ui;
pub mod utils;
