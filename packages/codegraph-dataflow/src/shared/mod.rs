//! Shared module - Common types and utilities
//!
//! This module contains types that are shared across all features.

#[macro_use]
pub mod macros;
pub mod models;

pub use models::*;
