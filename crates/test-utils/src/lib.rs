//! Shared test utilities for the line-render workspace.
//!
//! This crate provides common testing infrastructure including:
//! - WKT text generators for line strings and other geometry types
//! - Common extents and row fixtures
//! - Temporary output paths
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{line_string_wkt, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
