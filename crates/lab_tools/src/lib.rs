//! # Balance Lab Tools
//!
//! Command-line side of the balance lab:
//! - Document loading (JSON or RON)
//! - Plain-text views of duels, tables, stages and checklists
//! - Markdown balance report

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod loader;
pub mod render;
pub mod report;
