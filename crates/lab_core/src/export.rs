//! Runtime bundle handed to the game.
//!
//! The game only needs the catalogs and the config. Stages and the
//! designer checklist stay in the editor document.

use serde::{Deserialize, Serialize};

use crate::data::{ClassData, Config, Document, TerrainData, UnitData, WeaponData};

/// Game-facing projection of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct GameExport {
    /// Class catalog.
    pub classes: Vec<ClassData>,
    /// Weapon catalog.
    pub weapons: Vec<WeaponData>,
    /// Terrain catalog.
    pub terrain: Vec<TerrainData>,
    /// Placed units.
    pub units: Vec<UnitData>,
    /// Global switches.
    pub config: Config,
}

/// Project a document into its runtime bundle.
#[must_use]
pub fn export_game(document: &Document) -> GameExport {
    GameExport {
        classes: document.classes.clone(),
        weapons: document.weapons.clone(),
        terrain: document.terrain.clone(),
        units: document.units.clone(),
        config: document.config.clone(),
    }
}
