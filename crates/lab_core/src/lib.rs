//! # Lab Core
//!
//! Deterministic combat metrics engine for tactics-RPG balancing.
//!
//! This crate contains **only** pure computation:
//! - No rendering
//! - No IO
//! - No randomness (crit and hit are folded in as expected values)
//!
//! Every view is recomputed from an immutable [`data::Document`] snapshot,
//! so the same document and selection always give the same numbers.
//!
//! ## Crate Structure
//!
//! - [`data`] - Serde data model of the balance document
//! - [`stats`] - Stat resolution and terrain modifiers
//! - [`combat`] - Expected-value attack simulation
//! - [`metrics`] - Time-to-kill and effective HP
//! - [`tables`] - Class and unit tables against the standard unit
//! - [`aggregate`] - Per-class and global roll-ups of unit tables
//! - [`stage_analysis`] - Static threat estimate on a stage
//! - [`checklist`] - Designer checklist metrics and verdicts
//! - [`review`] - Class and duel reviews
//! - [`export`] - Runtime bundle for the game

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod aggregate;
pub mod archetype;
pub mod checklist;
pub mod combat;
pub mod data;
pub mod error;
pub mod export;
pub mod metrics;
pub mod review;
pub mod selection;
pub mod stage_analysis;
pub mod stats;
pub mod tables;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::{
        aggregate_by_class, global_overview, ClassAggregate, GlobalOverview,
    };
    pub use crate::checklist::{
        evaluate_checklist, ChecklistReport, ItemEvaluation, Metrics, Verdict,
    };
    pub use crate::combat::{simulate, AttackContext, AttackResult, CombatRules};
    pub use crate::data::*;
    pub use crate::error::{LabError, Result};
    pub use crate::export::{export_game, GameExport};
    pub use crate::metrics::{effective_hp, time_to_kill};
    pub use crate::review::{review_class, review_duel, ClassReview, DuelReview, Finding};
    pub use crate::selection::{Scope, Selection};
    pub use crate::stage_analysis::{analyze_selected_stage, analyze_stage, StageAnalysis};
    pub use crate::stats::{apply_terrain, resolve_stats, DefenderStats, StatBlock};
    pub use crate::tables::{class_table, unit_table, ClassRow, UnitRow};
}
