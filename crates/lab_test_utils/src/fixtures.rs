//! Test fixtures and helpers.
//!
//! Builders for catalog entries and a complete example document for
//! consistent testing.
//!
//! # Example document
//!
//! Four classes (swordsman, lancer, mage, priest), four weapons, three
//! terrains and three units (`p1`, `p2` players, `e1` enemy), plus one
//! stage and a seven-rule checklist. With no selection the standard unit
//! is `e1`, a level-1 lancer with 20 HP, DEF 4 and MDEF 2.

use lab_core::data::{
    ChecklistExtra, ChecklistItem, ClassData, Config, Document, PartialStats, Position, Side,
    StageData, TerrainBonus, TerrainData, UnitData, WeaponData, WeaponKind,
};

/// Build a class with a full base stat line.
#[must_use]
pub fn class(id: &str, name: &str, role: &str, base_stats: PartialStats) -> ClassData {
    ClassData {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        base_stats,
    }
}

/// Build a weapon with explicit numbers.
#[must_use]
pub fn weapon(
    id: &str,
    kind: WeaponKind,
    might: f64,
    hit: f64,
    range: (f64, f64),
) -> WeaponData {
    WeaponData {
        id: id.to_string(),
        name: id.replace('_', " "),
        kind,
        might: Some(might),
        hit: Some(hit),
        crit: Some(0.0),
        range_min: Some(range.0),
        range_max: Some(range.1),
    }
}

/// Build a terrain with a `(def, mdef, avoid)` bonus.
#[must_use]
pub fn terrain(id: &str, name: &str, move_cost: f64, bonus: (f64, f64, f64)) -> TerrainData {
    TerrainData {
        id: id.to_string(),
        name: name.to_string(),
        move_cost: Some(move_cost),
        bonus: TerrainBonus {
            def: Some(bonus.0),
            mdef: Some(bonus.1),
            avoid: Some(bonus.2),
        },
    }
}

/// Build a level-1 unit at a position.
#[must_use]
pub fn unit(
    id: &str,
    name: &str,
    class_id: &str,
    weapon_id: &str,
    side: Side,
    (x, y): (i32, i32),
) -> UnitData {
    UnitData {
        id: id.to_string(),
        name: name.to_string(),
        class_id: class_id.to_string(),
        weapon_id: weapon_id.to_string(),
        side,
        level: 1,
        position: Position::new(x, y),
        stats_override: None,
    }
}

/// Build a checklist rule.
#[must_use]
pub fn rule(id: &str, label: &str, metric: &str, min: f64, max: f64) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        label: label.to_string(),
        metric: metric.to_string(),
        min: Some(min),
        max: Some(max),
        extra: None,
    }
}

/// A `width * height` grid of `fill` with some cells replaced.
#[must_use]
pub fn grid(width: u32, height: u32, fill: &str, cells: &[((u32, u32), &str)]) -> Vec<String> {
    let mut grid = vec![fill.to_string(); (width * height) as usize];
    for ((x, y), id) in cells {
        if *x < width && *y < height {
            grid[(y * width + x) as usize] = (*id).to_string();
        }
    }
    grid
}

/// The example stage: a 10x6 field with a forest under `p1` and a fort
/// under `e1`.
#[must_use]
pub fn example_stage() -> StageData {
    StageData {
        id: "s1".to_string(),
        name: "Border Field".to_string(),
        width: 10,
        height: 6,
        terrain_grid: grid(10, 6, "plain", &[((2, 4), "forest"), ((7, 2), "fort")]),
        units: vec!["p1".to_string(), "p2".to_string(), "e1".to_string()],
    }
}

/// The example checklist, one rule per computed metric.
#[must_use]
pub fn example_checklist() -> Vec<ChecklistItem> {
    let mut mage = rule("c5", "Mage pressure", "mage_expected_damage", 4.0, 8.0);
    mage.extra = Some(ChecklistExtra {
        check_mage_ehp_max: true,
    });

    vec![
        rule("c1", "Average TTK vs standard", "ttk_vs_standard_avg", 2.0, 3.0),
        rule("c2", "Average hit vs standard", "hit_vs_standard_avg", 0.7, 0.9),
        rule("c3", "No class deals 0 damage", "zero_damage_classes", 0.0, 0.0),
        rule("c4", "Priest stays soft", "priest_expected_damage", 0.0, 3.0),
        mage,
        rule("c6", "Mage kills in 2-3 rounds", "mage_ttk", 2.0, 3.5),
        rule("c7", "Tank holds the line", "tank_survive_hits", 3.0, 6.0),
    ]
}

/// The complete example document.
#[must_use]
pub fn example_document() -> Document {
    Document {
        config: Config {
            enable_doubling: false,
            enable_crit: false,
            crit_multiplier: Some(3.0),
            base_avoid: None,
        },
        classes: vec![
            class("swordsman", "Swordsman", "dps", PartialStats::full(18.0, 6.0, 3.0, 1.0, 2.0, 7.0)),
            class("lancer", "Lancer", "bruiser", PartialStats::full(20.0, 6.0, 4.0, 1.0, 2.0, 5.0)),
            class("mage", "Mage", "magic", PartialStats::full(16.0, 1.0, 1.0, 7.0, 3.0, 5.0)),
            class("priest", "Priest", "support", PartialStats::full(17.0, 1.0, 2.0, 5.0, 4.0, 4.0)),
        ],
        weapons: vec![
            weapon("iron_sword", WeaponKind::Physical, 4.0, 85.0, (1.0, 1.0)),
            weapon("iron_lance", WeaponKind::Physical, 4.0, 80.0, (1.0, 1.0)),
            weapon("fire", WeaponKind::Magic, 4.0, 90.0, (1.0, 2.0)),
            weapon("blowgun", WeaponKind::Magic, 1.0, 90.0, (1.0, 2.0)),
        ],
        terrain: vec![
            terrain("plain", "Plain", 1.0, (0.0, 0.0, 0.0)),
            terrain("forest", "Forest", 2.0, (1.0, 0.0, 15.0)),
            terrain("fort", "Fort", 2.0, (2.0, 2.0, 10.0)),
        ],
        units: vec![
            unit("p1", "Hero", "swordsman", "iron_sword", Side::Player, (2, 4)),
            unit("p2", "Priest", "priest", "blowgun", Side::Player, (3, 4)),
            unit("e1", "Bandit", "lancer", "iron_lance", Side::Enemy, (7, 2)),
        ],
        stages: vec![example_stage()],
        checklist: example_checklist(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_stage_grid_is_consistent() {
        let stage = example_stage();
        assert!(stage.has_consistent_grid());
        assert_eq!(stage.terrain_at(2, 4), Some("forest"));
        assert_eq!(stage.terrain_at(7, 2), Some("fort"));
        assert_eq!(stage.terrain_at(0, 0), Some("plain"));
    }

    #[test]
    fn test_example_document_references_resolve() {
        let doc = example_document();
        for u in &doc.units {
            assert!(doc.class(&u.class_id).is_some(), "class of {}", u.id);
            assert!(doc.weapon(&u.weapon_id).is_some(), "weapon of {}", u.id);
        }
        assert_eq!(doc.units_on(&doc.stages[0]).count(), 3);
    }

    #[test]
    fn test_grid_ignores_out_of_bounds_cells() {
        let g = grid(2, 2, "plain", &[((5, 5), "forest")]);
        assert!(g.iter().all(|c| c == "plain"));
    }
}
