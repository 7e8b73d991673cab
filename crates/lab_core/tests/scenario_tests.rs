//! End-to-end scenarios over the example balance document.
//!
//! These tests pin the numbers a designer sees for the shipped example so
//! formula changes show up as explicit diffs.

use lab_core::prelude::*;
use lab_core::checklist::{compute_metrics, names};
use lab_test_utils::fixtures::{class, example_document, unit, weapon};
use lab_test_utils::purity::verify_purity;

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

// =============================================================================
// Attack scenarios
// =============================================================================

mod attack {
    use super::*;

    /// Swordsman with an iron sword against a swordsman standing in a forest.
    #[test]
    fn test_scenario_forest_duel() {
        let mut doc = example_document();
        doc.units.push(unit(
            "e2",
            "Mercenary",
            "swordsman",
            "iron_sword",
            Side::Enemy,
            (5, 5),
        ));
        let selection = Selection::from_config(&doc.config)
            .with_attacker("p1")
            .with_defender("e2")
            .with_defender_terrain("forest");

        let review = review_duel(&doc, &selection).unwrap();
        let result = &review.result;

        // max(0, 6 + 4 - (3 + 1)) = 6
        assert_eq!(result.damage, 6.0);
        // (85 - 15) / 100
        assert!(close(result.hit_chance, 0.70));
        assert_eq!(result.attacks_count, 1);
        assert_eq!(result.crit_factor, 1.0);
        assert!(close(result.expected_damage, 4.2));
        assert!(close(review.ttk, 18.0 / 4.2));
        assert!((review.ttk - 4.2857).abs() < 1e-4);
        assert_eq!(result.terrain_name.as_deref(), Some("Forest"));
    }

    /// A weak caster cannot scratch the priest: zero damage, infinite TTK.
    #[test]
    fn test_scenario_zero_damage() {
        let doc = example_document();
        let selection = Selection::from_config(&doc.config).with_defender("p2");

        let review = review_class(&doc, &selection, "swordsman", "blowgun").unwrap();

        // max(0, 1 + 1 - 4) = 0
        assert!(review.result.is_magic);
        assert_eq!(review.result.damage, 0.0);
        assert_eq!(review.result.expected_damage, 0.0);
        assert_eq!(review.ttk, f64::INFINITY);
        assert_eq!(review.damage_verdict, Verdict::Fail);
        assert_eq!(review.expected_verdict, Verdict::Fail);
        assert_eq!(review.ttk_verdict, Verdict::Fail);
        assert_eq!(review.alerts[0].level, Verdict::Fail);
        assert_eq!(review.advice[0].level, Verdict::Fail);
    }

    /// Healing is never offensive.
    #[test]
    fn test_scenario_heal() {
        let mut doc = example_document();
        doc.classes.push(class(
            "cleric",
            "Cleric",
            "support",
            PartialStats::full(17.0, 2.0, 2.0, 5.0, 4.0, 4.0),
        ));
        doc.weapons
            .push(weapon("mend", WeaponKind::Heal, 5.0, 100.0, (1.0, 1.0)));
        let selection = Selection::from_config(&doc.config);

        let review = review_class(&doc, &selection, "cleric", "mend").unwrap();

        // -(2 + 5), defense ignored
        assert!(review.result.is_heal);
        assert_eq!(review.result.damage, -7.0);
        assert!(review.result.expected_damage < 0.0);
        assert!(!review.result.is_offensive());
        assert_eq!(review.ttk, f64::INFINITY);
        assert_eq!(review.expected_verdict, Verdict::Fail);
    }

    #[test]
    fn test_crit_and_doubling_toggles() {
        let mut doc = example_document();
        doc.weapons[0].crit = Some(10.0);
        let ctx = AttackContext::new(&doc, CombatRules::from_config(&doc.config))
            .on_terrain(None);
        let p1 = doc.unit("p1").unwrap();
        let p2 = doc.unit("p2").unwrap();

        // Swordsman spd 7 vs priest base spd 4: a gap of 3 never doubles.
        let plain = simulate(p1, p2, &ctx).unwrap();
        let boosted = simulate(
            p1,
            p2,
            &AttackContext {
                rules: ctx.rules.with_doubling(true).with_crit(true),
                ..ctx
            },
        )
        .unwrap();

        assert_eq!(plain.attacks_count, 1);
        assert_eq!(boosted.attacks_count, 1);
        // 1 + 0.1 * (3 - 1)
        assert!(close(boosted.crit_factor, 1.2));
        assert!(close(boosted.expected_damage, plain.expected_damage * 1.2));
    }
}

// =============================================================================
// Tables and aggregates
// =============================================================================

mod tables {
    use super::*;

    #[test]
    fn test_class_table_against_bandit() {
        let doc = example_document();
        let selection = Selection::from_config(&doc.config);
        let rows = class_table(&doc, &selection).unwrap();

        let order: Vec<&str> = rows.iter().map(|r| r.class_id.as_str()).collect();
        assert_eq!(order, vec!["mage", "priest", "swordsman", "lancer"]);

        // Priest picks the first magic weapon: 5 + 4 - 2 = 7 at 90%.
        assert_eq!(rows[1].weapon_id, "fire");
        assert!(close(rows[1].expected_damage, 6.3));
        assert!(close(rows[0].ttk, 20.0 / 8.1));
    }

    #[test]
    fn test_unit_table_and_roll_ups() {
        let doc = example_document();
        let selection = Selection::from_config(&doc.config).with_scope(Scope::Player);
        let rows = unit_table(&doc, &selection).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit_id, "p1");
        assert!(close(rows[0].expected_damage, 5.1));
        assert_eq!(rows[1].unit_id, "p2");
        assert!(close(rows[1].expected_damage, 3.6));

        let by_class = aggregate_by_class(&rows);
        assert_eq!(by_class[0].class_id, "swordsman");
        assert_eq!(by_class[1].class_id, "priest");

        let overview = global_overview(&rows);
        assert_eq!(overview.count, 2);
        assert_eq!(overview.slow_count, 1);
        assert_eq!(overview.one_shot_count, 0);
        assert_eq!(overview.low_hit_count, 0);
        assert!(close(overview.ttk_avg, (20.0 / 5.1 + 20.0 / 3.6) / 2.0));
    }

    #[test]
    fn test_enemy_scope_excludes_standard() {
        let doc = example_document();
        let selection = Selection::from_config(&doc.config).with_scope(Scope::Enemy);
        assert!(unit_table(&doc, &selection).unwrap().is_empty());
    }
}

// =============================================================================
// Stage
// =============================================================================

mod stage {
    use super::*;

    #[test]
    fn test_example_stage_has_no_immediate_threat() {
        let doc = example_document();
        let selection = Selection::from_config(&doc.config).with_stage("s1");
        let analysis = analyze_selected_stage(&doc, &selection, 6).unwrap();

        assert_eq!(analysis.per_player.len(), 2);
        // The lance only reaches adjacent tiles.
        assert!(analysis.per_player.iter().all(|p| p.threats == 0));
        assert!(analysis
            .per_player
            .iter()
            .all(|p| p.survive_turns == f64::INFINITY));
        assert_eq!(analysis.per_player[0].terrain_id.as_deref(), Some("forest"));
        assert!(close(analysis.avg_ttk, (20.0 / 5.1 + 20.0 / 3.6) / 2.0));
    }

    #[test]
    fn test_adjacent_bandit_threatens() {
        let mut doc = example_document();
        doc.units[2].position = Position::new(2, 3);
        let analysis = analyze_stage(&doc, &doc.stages[0], 6, CombatRules::default());

        let hero = &analysis.per_player[0];
        assert_eq!(hero.threat_ids, vec!["e1".to_string()]);
        // Plain ground: 6 + 4 - 3 = 7 at 80%.
        assert!(close(hero.expected_incoming, 5.6));
        assert!(close(hero.survive_turns, 18.0 / 5.6));
    }
}

// =============================================================================
// Checklist
// =============================================================================

mod checklist {
    use super::*;

    #[test]
    fn test_example_metrics() {
        let doc = example_document();
        let selection = Selection::from_config(&doc.config);
        let metrics = compute_metrics(&doc, &selection).unwrap();

        let avg_ttk = (20.0 / 5.1 * 2.0 + 20.0 / 8.1 + 20.0 / 6.3) / 4.0;
        assert!(close(metrics.get(names::TTK_VS_STANDARD_AVG).unwrap(), avg_ttk));
        assert!(close(metrics.get(names::HIT_VS_STANDARD_AVG).unwrap(), 0.875));
        assert_eq!(metrics.get(names::ZERO_DAMAGE_CLASSES), Some(0.0));
        assert!(close(metrics.get(names::PRIEST_EXPECTED_DAMAGE).unwrap(), 6.3));
        assert!(close(metrics.get(names::MAGE_EXPECTED_DAMAGE).unwrap(), 8.1));
        assert!(close(metrics.get(names::MAGE_TTK).unwrap(), 20.0 / 8.1));
        // Bandit lance on the mage: 6 + 4 - 1 = 9 at 80%.
        assert!(close(metrics.get(names::MAGE_EHP_TURNS).unwrap(), 16.0 / 7.2));
        // Tank resolves to the lancer by role: 6 + 4 - 4 = 6 at 80%.
        assert!(close(metrics.get(names::TANK_SURVIVE_HITS).unwrap(), 20.0 / 4.8));
        assert_eq!(metrics.len(), 8);
    }

    #[test]
    fn test_example_verdicts() {
        let doc = example_document();
        let report = evaluate_checklist(&doc, &Selection::from_config(&doc.config)).unwrap();

        let verdicts: Vec<(&str, Verdict)> = report
            .items
            .iter()
            .map(|i| (i.item_id.as_str(), i.verdict))
            .collect();
        assert_eq!(
            verdicts,
            vec![
                ("c1", Verdict::Fail),
                ("c2", Verdict::Ok),
                ("c3", Verdict::Ok),
                ("c4", Verdict::Fail),
                ("c5", Verdict::Warn),
                ("c6", Verdict::Ok),
                ("c7", Verdict::Ok),
            ]
        );
        assert_eq!(report.worst(), Verdict::Fail);
    }

    #[test]
    fn test_tanky_mage_is_downgraded() {
        let mut doc = example_document();
        doc.checklist[4].max = Some(9.0);
        let selection = Selection::from_config(&doc.config);

        let report = evaluate_checklist(&doc, &selection).unwrap();
        assert_eq!(report.items[4].verdict, Verdict::Ok);

        // 30 HP against 7.2 incoming is over 4 rounds.
        doc.classes[2].base_stats.hp = Some(30.0);
        let report = evaluate_checklist(&doc, &selection).unwrap();
        assert_eq!(report.items[4].verdict, Verdict::Warn);
        assert!(report.items[4].extra_note.is_some());
    }

    #[test]
    fn test_missing_standard() {
        let mut doc = example_document();
        doc.units.clear();
        assert_eq!(
            evaluate_checklist(&doc, &Selection::default()),
            Err(LabError::MissingStandard)
        );
    }
}

// =============================================================================
// Purity
// =============================================================================

mod purity {
    use super::*;

    #[test]
    fn test_views_are_pure() {
        let doc = example_document();
        let selection = Selection::from_config(&doc.config)
            .with_attacker("p1")
            .with_defender("e1")
            .with_attacker_terrain("fort")
            .with_defender_terrain("forest")
            .with_stage("s1");

        verify_purity(&doc, 3, |d| class_table(d, &selection).ok()).assert_pure();
        verify_purity(&doc, 3, |d| unit_table(d, &selection).ok()).assert_pure();
        verify_purity(&doc, 3, |d| evaluate_checklist(d, &selection).ok()).assert_pure();
        verify_purity(&doc, 3, |d| analyze_selected_stage(d, &selection, 6).ok()).assert_pure();
        verify_purity(&doc, 3, |d| review_duel(d, &selection).ok()).assert_pure();
        verify_purity(&doc, 3, export_game).assert_pure();
    }

    #[test]
    fn test_ttk_is_total() {
        assert_eq!(time_to_kill(0.0, 0.0), f64::INFINITY);
        assert_eq!(time_to_kill(0.0, 2.0), 0.5);
    }
}
