//! Proptest strategies for the combat engine.
//!
//! These strategies generate designer-sized catalog entries and a minimal
//! two-unit duel document for property-based testing.

use lab_core::data::{
    ClassData, Document, PartialStats, Side, TerrainBonus, TerrainData, UnitData, WeaponData,
    WeaponKind,
};
use proptest::prelude::*;

/// Attacking unit id in [`arb_duel`] documents.
pub const DUEL_ATTACKER: &str = "a";
/// Defending unit id in [`arb_duel`] documents.
pub const DUEL_DEFENDER: &str = "d";
/// Terrain id in [`arb_duel`] documents.
pub const DUEL_TERRAIN: &str = "t";

/// Generate a stat value (0-40).
pub fn arb_stat() -> impl Strategy<Value = f64> {
    (0u32..=40).prop_map(f64::from)
}

/// Generate HP values (1-80).
pub fn arb_hp() -> impl Strategy<Value = f64> {
    (1u32..=80).prop_map(f64::from)
}

/// Generate a percentage (0-100).
pub fn arb_percent() -> impl Strategy<Value = f64> {
    (0u32..=100).prop_map(f64::from)
}

/// Generate a complete stat line.
pub fn arb_stat_line() -> impl Strategy<Value = PartialStats> {
    (arb_hp(), arb_stat(), arb_stat(), arb_stat(), arb_stat(), arb_stat())
        .prop_map(|(hp, atk, def, matk, mdef, spd)| PartialStats::full(hp, atk, def, matk, mdef, spd))
}

/// Generate any weapon kind, including unknown.
pub fn arb_weapon_kind() -> impl Strategy<Value = WeaponKind> {
    prop_oneof![
        Just(WeaponKind::Physical),
        Just(WeaponKind::Magic),
        Just(WeaponKind::Heal),
        Just(WeaponKind::Unknown),
    ]
}

/// Generate an offensive weapon kind.
pub fn arb_offensive_kind() -> impl Strategy<Value = WeaponKind> {
    prop_oneof![
        Just(WeaponKind::Physical),
        Just(WeaponKind::Magic),
        Just(WeaponKind::Unknown),
    ]
}

/// Generate a weapon of the given kind strategy.
pub fn arb_weapon(kind: impl Strategy<Value = WeaponKind>) -> impl Strategy<Value = WeaponData> {
    (kind, arb_stat(), arb_percent(), arb_percent()).prop_map(|(kind, might, hit, crit)| WeaponData {
        id: "w".to_string(),
        name: "Weapon".to_string(),
        kind,
        might: Some(might),
        hit: Some(hit),
        crit: Some(crit),
        range_min: Some(1.0),
        range_max: Some(1.0),
    })
}

/// Generate a terrain with avoid in 0-100.
pub fn arb_terrain() -> impl Strategy<Value = TerrainData> {
    ((0u32..=5), (0u32..=5), arb_percent()).prop_map(|(def, mdef, avoid)| TerrainData {
        id: DUEL_TERRAIN.to_string(),
        name: "Terrain".to_string(),
        move_cost: Some(1.0),
        bonus: TerrainBonus {
            def: Some(f64::from(def)),
            mdef: Some(f64::from(mdef)),
            avoid: Some(avoid),
        },
    })
}

/// Generate a two-unit duel document: unit `a` with weapon `w` attacks
/// unit `d`, which may stand on terrain `t`.
pub fn arb_duel(kind: impl Strategy<Value = WeaponKind>) -> impl Strategy<Value = Document> {
    (arb_stat_line(), arb_stat_line(), arb_weapon(kind), arb_terrain()).prop_map(
        |(attacker_stats, defender_stats, weapon, terrain)| {
            let weapon_id = weapon.id.clone();
            let class = |id: &str, base_stats| ClassData {
                id: id.to_string(),
                name: id.to_uppercase(),
                role: String::new(),
                base_stats,
            };
            let unit = |id: &str, class_id: &str, side| UnitData {
                id: id.to_string(),
                name: id.to_uppercase(),
                class_id: class_id.to_string(),
                weapon_id: weapon_id.clone(),
                side,
                level: 1,
                ..Default::default()
            };
            Document {
                classes: vec![class("ca", attacker_stats), class("cd", defender_stats)],
                units: vec![
                    unit(DUEL_ATTACKER, "ca", Side::Player),
                    unit(DUEL_DEFENDER, "cd", Side::Enemy),
                ],
                weapons: vec![weapon],
                terrain: vec![terrain],
                ..Default::default()
            }
        },
    )
}
