#![warn(missing_docs)]

//! Shared libraries and utilities for starling crates. This holds the output
//! model that every other crate reports its progress through

/// Output messages and the trait for displaying them
pub mod output;
/// Common utilities
pub mod util;
