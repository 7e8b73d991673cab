//! Stat resolution and terrain modifiers.
//!
//! A unit's effective stats are its class base stats with any per-unit
//! override replacing (not adding to) the matching field. Terrain only ever
//! touches the defender, and only for the duration of one calculation.

use serde::{Deserialize, Serialize};

use crate::data::{lenient::finite_or, ClassData, PartialStats, TerrainData, UnitData};

/// A fully resolved six-stat block. Every field is finite.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    /// Hit points.
    pub hp: f64,
    /// Physical attack.
    pub atk: f64,
    /// Physical defense.
    pub def: f64,
    /// Magic attack.
    pub matk: f64,
    /// Magic defense.
    pub mdef: f64,
    /// Speed.
    pub spd: f64,
}

impl StatBlock {
    /// Merge a base line with an optional override line.
    ///
    /// Each field takes the override when finite, else the base when finite,
    /// else 0.
    #[must_use]
    pub fn merge(base: &PartialStats, over: Option<&PartialStats>) -> Self {
        fn pick(base: Option<f64>, over: Option<f64>) -> f64 {
            finite_or(over, finite_or(base, 0.0))
        }

        let none = PartialStats::default();
        let over = over.unwrap_or(&none);
        Self {
            hp: pick(base.hp, over.hp),
            atk: pick(base.atk, over.atk),
            def: pick(base.def, over.def),
            matk: pick(base.matk, over.matk),
            mdef: pick(base.mdef, over.mdef),
            spd: pick(base.spd, over.spd),
        }
    }
}

/// Defender stats after terrain, with the avoid the terrain grants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DefenderStats {
    /// Stats with terrain DEF/MDEF added. Speed is untouched.
    pub stats: StatBlock,
    /// Avoid in percentage points. Comes from terrain only.
    pub avoid: f64,
}

/// Resolve a unit's effective stats.
///
/// Returns `None` when the unit's class id is not in the catalog.
#[must_use]
pub fn resolve_stats(classes: &[ClassData], unit: &UnitData) -> Option<StatBlock> {
    let Some(class) = classes.iter().find(|c| c.id == unit.class_id) else {
        tracing::trace!(unit = %unit.id, class = %unit.class_id, "class does not resolve");
        return None;
    };
    Some(StatBlock::merge(
        &class.base_stats,
        unit.stats_override.as_ref(),
    ))
}

/// Apply a terrain's defensive bonus to a defender.
///
/// No terrain means no bonus. Avoid is set from the terrain, never summed
/// with anything the caller had before.
#[must_use]
pub fn apply_terrain(stats: &StatBlock, terrain: Option<&TerrainData>) -> DefenderStats {
    let (def, mdef, avoid) = terrain.map_or((0.0, 0.0, 0.0), |t| t.bonus.resolved());
    DefenderStats {
        stats: StatBlock {
            def: stats.def + def,
            mdef: stats.mdef + mdef,
            ..*stats
        },
        avoid,
    }
}
