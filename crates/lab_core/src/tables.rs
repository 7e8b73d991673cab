//! Comparison tables against the standard unit.
//!
//! Each row is one attacker simulated against the same standard defender on
//! the same terrain. Rows whose references do not resolve are skipped so a
//! half-edited document still produces a table.

use serde::{Deserialize, Serialize};

use crate::archetype::representative;
use crate::combat::{simulate, AttackContext, AttackResult};
use crate::data::{Document, Side, UnitData};
use crate::error::{LabError, Result};
use crate::metrics::time_to_kill;
use crate::selection::{Scope, Selection};
use crate::stats::resolve_stats;

/// One class, represented by a synthetic unit, against the standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRow {
    /// Class id.
    pub class_id: String,
    /// Class display name.
    pub class_name: String,
    /// Weapon picked for the class.
    pub weapon_id: String,
    /// Weapon display name.
    pub weapon_name: String,
    /// Hit chance per strike.
    pub hit: f64,
    /// Damage per landed strike.
    pub damage: f64,
    /// Strikes per round.
    pub attacks: u32,
    /// Expected damage per round.
    pub expected_damage: f64,
    /// Rounds to kill the standard.
    pub ttk: f64,
}

/// One placed unit against the standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRow {
    /// Unit id.
    pub unit_id: String,
    /// Unit display name.
    pub unit_name: String,
    /// Allegiance.
    pub side: Side,
    /// Class id.
    pub class_id: String,
    /// Class display name.
    pub class_name: String,
    /// Equipped weapon display name.
    pub weapon_name: String,
    /// Hit chance per strike.
    pub hit: f64,
    /// Damage per landed strike.
    pub damage: f64,
    /// Strikes per round.
    pub attacks: u32,
    /// Expected damage per round.
    pub expected_damage: f64,
    /// Rounds to kill the standard.
    pub ttk: f64,
    /// Landed strikes do nothing.
    pub zero_damage: bool,
}

fn standard_hp(ctx: &AttackContext<'_>, standard: &UnitData) -> f64 {
    resolve_stats(&ctx.document.classes, standard).map_or(1.0, |s| s.hp)
}

/// Every class against the standard, highest expected damage first.
#[must_use]
pub fn class_vs_standard(ctx: &AttackContext<'_>, standard: &UnitData) -> Vec<ClassRow> {
    let doc = ctx.document;
    let hp = standard_hp(ctx, standard);

    let mut rows: Vec<ClassRow> = doc
        .classes
        .iter()
        .filter_map(|class| {
            let (attacker, weapon) = representative(doc, class)?;
            let Some(result) = simulate(&attacker, standard, ctx) else {
                tracing::debug!(class = %class.id, "skipping class row");
                return None;
            };
            Some(ClassRow {
                class_id: class.id.clone(),
                class_name: class.name.clone(),
                weapon_id: weapon.id.clone(),
                weapon_name: weapon.name.clone(),
                hit: result.hit_chance,
                damage: result.damage,
                attacks: result.attacks_count,
                expected_damage: result.expected_damage,
                ttk: time_to_kill(hp, result.expected_damage),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.expected_damage.total_cmp(&a.expected_damage));
    rows
}

fn unit_row(unit: &UnitData, result: &AttackResult, ctx: &AttackContext<'_>, hp: f64) -> UnitRow {
    let doc = ctx.document;
    UnitRow {
        unit_id: unit.id.clone(),
        unit_name: unit.name.clone(),
        side: unit.side,
        class_id: unit.class_id.clone(),
        class_name: doc
            .class(&unit.class_id)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        weapon_name: doc
            .weapon(&unit.weapon_id)
            .map(|w| w.name.clone())
            .unwrap_or_default(),
        hit: result.hit_chance,
        damage: result.damage,
        attacks: result.attacks_count,
        expected_damage: result.expected_damage,
        ttk: time_to_kill(hp, result.expected_damage),
        zero_damage: result.damage == 0.0,
    }
}

/// Every placed unit in `scope` (except the standard) against the standard,
/// highest expected damage first.
#[must_use]
pub fn unit_vs_standard(
    ctx: &AttackContext<'_>,
    standard: &UnitData,
    scope: Scope,
) -> Vec<UnitRow> {
    let hp = standard_hp(ctx, standard);

    let mut rows: Vec<UnitRow> = ctx
        .document
        .units
        .iter()
        .filter(|u| scope.includes(u) && u.id != standard.id)
        .filter_map(|unit| {
            let Some(result) = simulate(unit, standard, ctx) else {
                tracing::debug!(unit = %unit.id, "skipping unit row");
                return None;
            };
            Some(unit_row(unit, &result, ctx, hp))
        })
        .collect();

    rows.sort_by(|a, b| b.expected_damage.total_cmp(&a.expected_damage));
    rows
}

/// Class table for a selection.
///
/// # Errors
///
/// [`LabError::MissingStandard`] when no standard unit resolves.
pub fn class_table(document: &Document, selection: &Selection) -> Result<Vec<ClassRow>> {
    let standard = selection
        .standard_unit(document)
        .ok_or(LabError::MissingStandard)?;
    Ok(class_vs_standard(&selection.offense_context(document), standard))
}

/// Unit table for a selection, filtered by its scope.
///
/// # Errors
///
/// [`LabError::MissingStandard`] when no standard unit resolves.
pub fn unit_table(document: &Document, selection: &Selection) -> Result<Vec<UnitRow>> {
    let standard = selection
        .standard_unit(document)
        .ok_or(LabError::MissingStandard)?;
    Ok(unit_vs_standard(
        &selection.offense_context(document),
        standard,
        selection.scope,
    ))
}
