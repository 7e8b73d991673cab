//! Terrain definitions.

use serde::{Deserialize, Serialize};

use super::lenient::{self, finite_or};

/// Defensive bonus granted to a unit standing on a terrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainBonus {
    /// Added to DEF.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub def: Option<f64>,
    /// Added to MDEF.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mdef: Option<f64>,
    /// Avoid in percentage points, subtracted from the attacker's hit.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub avoid: Option<f64>,
}

impl TerrainBonus {
    /// Resolved `(def, mdef, avoid)` with 0 for anything unset.
    #[must_use]
    pub fn resolved(&self) -> (f64, f64, f64) {
        (
            finite_or(self.def, 0.0),
            finite_or(self.mdef, 0.0),
            finite_or(self.avoid, 0.0),
        )
    }
}

/// A terrain type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainData {
    /// Unique terrain identifier, referenced by stage cells.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Movement cost. Carried for the editor, unused by combat.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub move_cost: Option<f64>,

    /// Bonus applied to the defender.
    #[serde(default)]
    pub bonus: TerrainBonus,
}
