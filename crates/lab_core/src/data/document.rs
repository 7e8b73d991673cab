//! The balance document: every catalog plus global config.

use serde::{Deserialize, Serialize};

use super::checklist_data::ChecklistItem;
use super::class_data::ClassData;
use super::lenient::{self, finite_or};
use super::stage_data::StageData;
use super::terrain_data::TerrainData;
use super::unit_data::UnitData;
use super::weapon_data::WeaponData;

/// Crit multiplier used when the config leaves it unset.
pub const DEFAULT_CRIT_MULTIPLIER: f64 = 3.0;

/// Global combat switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Fast units strike twice.
    #[serde(default)]
    pub enable_doubling: bool,

    /// Weapons' crit chance contributes to expected damage.
    #[serde(default)]
    pub enable_crit: bool,

    /// Damage multiplier of a critical hit.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub crit_multiplier: Option<f64>,

    /// Baseline avoid offset. Stored for the editor, never read by combat.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub base_avoid: Option<f64>,
}

impl Config {
    /// Crit multiplier with its default applied.
    #[must_use]
    pub fn crit_multiplier(&self) -> f64 {
        finite_or(self.crit_multiplier, DEFAULT_CRIT_MULTIPLIER)
    }
}

/// In-memory snapshot of everything the designer edits.
///
/// The engine only ever borrows a document. Catalog order is significant:
/// lookups return the first entry with a matching id, and weapon heuristics
/// pick the first weapon of a kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Global switches.
    #[serde(default)]
    pub config: Config,

    /// Class catalog.
    #[serde(default)]
    pub classes: Vec<ClassData>,

    /// Weapon catalog.
    #[serde(default)]
    pub weapons: Vec<WeaponData>,

    /// Terrain catalog.
    #[serde(default)]
    pub terrain: Vec<TerrainData>,

    /// Placed units.
    #[serde(default)]
    pub units: Vec<UnitData>,

    /// Maps.
    #[serde(default)]
    pub stages: Vec<StageData>,

    /// Designer checklist.
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Document {
    /// Look up a class by id.
    #[must_use]
    pub fn class(&self, id: &str) -> Option<&ClassData> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Look up a weapon by id.
    #[must_use]
    pub fn weapon(&self, id: &str) -> Option<&WeaponData> {
        self.weapons.iter().find(|w| w.id == id)
    }

    /// Look up a terrain by id.
    #[must_use]
    pub fn terrain(&self, id: &str) -> Option<&TerrainData> {
        self.terrain.iter().find(|t| t.id == id)
    }

    /// Look up a unit by id.
    #[must_use]
    pub fn unit(&self, id: &str) -> Option<&UnitData> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Look up a stage by id.
    #[must_use]
    pub fn stage(&self, id: &str) -> Option<&StageData> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Units listed on a stage, in stage order. Unknown ids are skipped.
    pub fn units_on<'a>(&'a self, stage: &'a StageData) -> impl Iterator<Item = &'a UnitData> + 'a {
        stage.units.iter().filter_map(move |id| {
            let unit = self.unit(id);
            if unit.is_none() {
                tracing::debug!(stage = %stage.id, unit = %id, "stage lists unknown unit");
            }
            unit
        })
    }

    /// Distinct class ids fielded by player units, in roster order,
    /// restricted to classes that exist.
    #[must_use]
    pub fn ally_class_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for unit in self.units.iter().filter(|u| u.is_player()) {
            let id = unit.class_id.as_str();
            if !ids.contains(&id) && self.class(id).is_some() {
                ids.push(id);
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Side;

    fn unit(id: &str, class_id: &str, side: Side) -> UnitData {
        UnitData {
            id: id.to_string(),
            class_id: class_id.to_string(),
            side,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_document_parses() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert!(doc.classes.is_empty());
        assert_eq!(doc.config.crit_multiplier(), DEFAULT_CRIT_MULTIPLIER);
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let mut doc = Document::default();
        doc.units.push(unit("u1", "a", Side::Player));
        doc.units.push(unit("u1", "b", Side::Enemy));
        assert_eq!(doc.unit("u1").map(|u| u.class_id.as_str()), Some("a"));
        assert!(doc.unit("missing").is_none());
    }

    #[test]
    fn test_ally_class_ids_are_distinct_and_resolved() {
        let mut doc = Document::default();
        for id in ["swordsman", "priest"] {
            doc.classes.push(ClassData {
                id: id.to_string(),
                ..Default::default()
            });
        }
        doc.units.push(unit("p1", "swordsman", Side::Player));
        doc.units.push(unit("p2", "ghost", Side::Player));
        doc.units.push(unit("p3", "swordsman", Side::Player));
        doc.units.push(unit("p4", "priest", Side::Player));
        doc.units.push(unit("e1", "lancer", Side::Enemy));

        assert_eq!(doc.ally_class_ids(), vec!["swordsman", "priest"]);
    }

    #[test]
    fn test_units_on_stage_skips_unknown_ids() {
        let mut doc = Document::default();
        doc.units.push(unit("p1", "a", Side::Player));
        let stage = StageData {
            id: "s".to_string(),
            units: vec!["p1".to_string(), "ghost".to_string()],
            ..Default::default()
        };
        let ids: Vec<&str> = doc.units_on(&stage).map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["p1"]);
    }
}
