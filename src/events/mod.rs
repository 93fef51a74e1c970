//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: entries store calls and their reconciliation into state
//! - Terminal events: user input and terminal ticks

pub mod network;
pub mod terminal;
