//! Data structures for the balance document.
//!
//! This module contains pure data structures describing classes, weapons,
//! terrain, units, stages and the designer checklist. All structs are
//! deserialized from the editor's JSON with camelCase keys.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! File loading is handled by `lab_tools`.

mod checklist_data;
mod class_data;
mod document;
pub mod lenient;
mod stage_data;
mod terrain_data;
mod unit_data;
mod weapon_data;

pub use checklist_data::{ChecklistExtra, ChecklistItem};
pub use class_data::{ClassData, PartialStats};
pub use document::{Config, Document, DEFAULT_CRIT_MULTIPLIER};
pub use stage_data::StageData;
pub use terrain_data::{TerrainBonus, TerrainData};
pub use unit_data::{Position, Side, UnitData};
pub use weapon_data::{WeaponData, WeaponKind};
