//! Utility functions and helpers.
//!
//! This module contains pure helpers used by the views, such as the
//! client-side entry filter.

pub mod filter;
