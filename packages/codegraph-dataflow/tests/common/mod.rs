//! Common test utilities for codegraph-dataflow
//!
//! Shared program fixtures and assertions for the integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
