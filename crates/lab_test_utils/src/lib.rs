//! # Lab Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Example balance document and builders
//! - Purity harness (repeatable output, untouched input)
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod purity;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
