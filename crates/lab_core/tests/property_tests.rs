//! Property-based tests for the combat formulas.

use lab_core::combat::{attacks_count, simulate, AttackContext, CombatRules};
use lab_core::data::{Document, UnitData, WeaponKind};
use lab_core::metrics::{effective_hp, time_to_kill};
use lab_core::stats::{apply_terrain, resolve_stats, StatBlock};
use lab_test_utils::proptest::prelude::*;
use lab_test_utils::strategies::{
    arb_duel, arb_offensive_kind, arb_stat, arb_terrain, arb_weapon_kind, DUEL_ATTACKER,
    DUEL_DEFENDER, DUEL_TERRAIN,
};

fn duel_context(doc: &Document, on_terrain: bool) -> AttackContext<'_> {
    let rules = CombatRules::default().with_doubling(true).with_crit(true);
    AttackContext::new(doc, rules).on_terrain(on_terrain.then_some(DUEL_TERRAIN))
}

fn units(doc: &Document) -> (&UnitData, &UnitData) {
    (&doc.units[0], &doc.units[1])
}

proptest! {
    /// Hit chance stays in [0, 1] for any weapon and terrain.
    #[test]
    fn prop_hit_chance_is_bounded(doc in arb_duel(arb_weapon_kind()), on_terrain in any::<bool>()) {
        let (attacker, defender) = units(&doc);
        prop_assert_eq!(attacker.id.as_str(), DUEL_ATTACKER);
        prop_assert_eq!(defender.id.as_str(), DUEL_DEFENDER);

        let result = simulate(attacker, defender, &duel_context(&doc, on_terrain)).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.hit_chance));
    }

    /// Offensive weapons never deal negative damage.
    #[test]
    fn prop_offense_damage_is_non_negative(doc in arb_duel(arb_offensive_kind()), on_terrain in any::<bool>()) {
        let (attacker, defender) = units(&doc);
        let result = simulate(attacker, defender, &duel_context(&doc, on_terrain)).unwrap();
        prop_assert!(result.damage >= 0.0);
        prop_assert!(result.expected_damage >= 0.0);
        prop_assert!(!result.is_heal);
    }

    /// Healing is never offensive and never killing.
    #[test]
    fn prop_heal_is_not_offensive(doc in arb_duel(Just(WeaponKind::Heal))) {
        let (attacker, defender) = units(&doc);
        let result = simulate(attacker, defender, &duel_context(&doc, true)).unwrap();
        prop_assert!(result.damage <= 0.0);
        prop_assert!(!result.is_offensive());
        prop_assert_eq!(time_to_kill(20.0, result.expected_damage), f64::INFINITY);
    }

    /// More expected damage always means fewer rounds.
    #[test]
    fn prop_ttk_strictly_decreases(
        hp in 1.0f64..1000.0,
        low in 0.1f64..100.0,
        delta in 0.01f64..100.0,
    ) {
        let high = low + delta;
        prop_assert!(time_to_kill(hp, high) < time_to_kill(hp, low));
        prop_assert_eq!(time_to_kill(hp, 0.0), f64::INFINITY);
        prop_assert_eq!(effective_hp(hp, low), time_to_kill(hp, low));
    }

    /// Doubling needs a speed lead of at least 4 over base speed.
    #[test]
    fn prop_doubling_threshold(defender_spd in arb_stat()) {
        let rules = CombatRules::default().with_doubling(true);
        let defender = StatBlock { spd: defender_spd, ..StatBlock::default() };
        let short = StatBlock { spd: defender_spd + 3.0, ..StatBlock::default() };
        let enough = StatBlock { spd: defender_spd + 4.0, ..StatBlock::default() };

        prop_assert_eq!(attacks_count(&short, &defender, &rules), 1);
        prop_assert_eq!(attacks_count(&enough, &defender, &rules), 2);
        prop_assert_eq!(attacks_count(&enough, &defender, &rules.with_doubling(false)), 1);
    }

    /// Applying terrain is stateless: the same base gives the same result.
    #[test]
    fn prop_terrain_is_idempotent(doc in arb_duel(arb_weapon_kind()), terrain in arb_terrain()) {
        let base = resolve_stats(&doc.classes, &doc.units[1]).unwrap();
        let once = apply_terrain(&base, Some(&terrain));
        let again = apply_terrain(&base, Some(&terrain));
        prop_assert_eq!(once, again);
        prop_assert_eq!(once.avoid, terrain.bonus.avoid.unwrap_or(0.0));
        prop_assert_eq!(once.stats.spd, base.spd);
    }
}
