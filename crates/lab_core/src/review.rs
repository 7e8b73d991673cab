//! Single-matchup reviews with verdicts, alerts and tuning advice.
//!
//! A class review pits a synthetic level-1 unit of a class, holding a given
//! weapon, against the standard unit. A duel review pits two placed units
//! against each other. Both resolve on the selection's defender terrain.

use serde::{Deserialize, Serialize};

use crate::aggregate::{LOW_HIT_THRESHOLD, ONE_SHOT_TTK, SLOW_TTK};
use crate::archetype::synthetic_unit;
use crate::checklist::Verdict;
use crate::combat::{simulate, AttackResult};
use crate::data::Document;
use crate::error::{LabError, Result};
use crate::metrics::time_to_kill;
use crate::selection::Selection;
use crate::stats::resolve_stats;

/// Hit chance band that reads as healthy.
pub const HIT_OK: (f64, f64) = (0.7, 0.9);
/// Hit chance band that is tolerable.
pub const HIT_WARN: (f64, f64) = (0.6, 0.95);
/// TTK band that reads as healthy.
pub const TTK_OK: (f64, f64) = (2.0, 3.0);
/// TTK band that is tolerable.
pub const TTK_WARN: (f64, f64) = (1.5, 4.0);

/// A leveled message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity.
    pub level: Verdict,
    /// Human-readable text.
    pub message: String,
}

impl Finding {
    fn new(level: Verdict, message: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
        }
    }
}

/// Grade a value against nested ok/warn bands (both inclusive).
#[must_use]
pub fn grade(value: f64, ok: (f64, f64), warn: (f64, f64)) -> Verdict {
    if value >= ok.0 && value <= ok.1 {
        Verdict::Ok
    } else if value >= warn.0 && value <= warn.1 {
        Verdict::Warn
    } else {
        Verdict::Fail
    }
}

fn positive(value: f64) -> Verdict {
    if value > 0.0 {
        Verdict::Ok
    } else {
        Verdict::Fail
    }
}

/// Matchups that break the feel of a fight.
#[must_use]
pub fn break_alerts(result: &AttackResult, ttk: f64) -> Vec<Finding> {
    let mut alerts = Vec::new();
    if result.damage == 0.0 {
        alerts.push(Finding::new(Verdict::Fail, "Damage is 0: useless on this standard."));
    }
    if result.hit_chance < LOW_HIT_THRESHOLD {
        alerts.push(Finding::new(
            Verdict::Warn,
            &format!("Hit under {:.0}%: frustration from misses.", LOW_HIT_THRESHOLD * 100.0),
        ));
    }
    if ttk < ONE_SHOT_TTK && result.expected_damage > 0.0 {
        alerts.push(Finding::new(Verdict::Warn, "Likely one-shot: too punishing."));
    }
    if ttk > SLOW_TTK {
        alerts.push(Finding::new(
            Verdict::Warn,
            &format!("TTK over {SLOW_TTK}: fights drag on."),
        ));
    }
    if alerts.is_empty() {
        alerts.push(Finding::new(Verdict::Ok, "No major alert."));
    }
    alerts
}

fn advise(result: &AttackResult, ttk: f64, flag_fast_kills: bool) -> Vec<Finding> {
    let mut advice = Vec::new();
    if result.damage == 0.0 {
        advice.push(Finding::new(
            Verdict::Fail,
            "Lower DEF/MDEF of the standard (or its terrain), or raise ATK/MATK/might.",
        ));
    }
    if result.hit_chance < HIT_OK.0 {
        advice.push(Finding::new(
            Verdict::Warn,
            "Raise weapon hit (+5 to +10) or lower terrain avoid.",
        ));
    }
    if ttk > TTK_OK.1 {
        advice.push(Finding::new(
            Verdict::Warn,
            "+1 might (weapon) or +1 ATK/MATK (class), or -1 DEF/MDEF on the standard.",
        ));
    }
    if flag_fast_kills && ttk < TTK_OK.0 {
        advice.push(Finding::new(
            Verdict::Warn,
            "+HP/+DEF on the standard, or lower might or ATK/MATK.",
        ));
    }
    if advice.is_empty() {
        advice.push(Finding::new(Verdict::Ok, "Nothing to change against this standard."));
    }
    advice
}

/// Tuning advice for a class against the standard.
#[must_use]
pub fn recommendations(result: &AttackResult, ttk: f64) -> Vec<Finding> {
    advise(result, ttk, true)
}

/// Tuning advice for a single duel. Fast kills are not flagged here.
#[must_use]
pub fn micro_recommendations(result: &AttackResult, ttk: f64) -> Vec<Finding> {
    advise(result, ttk, false)
}

/// Review of one class and weapon against the standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReview {
    /// Reviewed class.
    pub class_id: String,
    /// Weapon it was given.
    pub weapon_id: String,
    /// Standard unit it fought.
    pub standard_id: String,
    /// Standard unit HP.
    pub standard_hp: f64,
    /// Simulated round.
    pub result: AttackResult,
    /// Rounds to kill the standard.
    pub ttk: f64,
    /// Hit chance verdict.
    pub hit_verdict: Verdict,
    /// TTK verdict.
    pub ttk_verdict: Verdict,
    /// Expected damage verdict.
    pub expected_verdict: Verdict,
    /// Raw damage verdict.
    pub damage_verdict: Verdict,
    /// Break alerts, never empty.
    pub alerts: Vec<Finding>,
    /// Tuning advice, never empty.
    pub advice: Vec<Finding>,
}

/// Review a class with an explicit weapon against the standard unit.
///
/// # Errors
///
/// - [`LabError::MissingStandard`] when no standard unit resolves
/// - [`LabError::ClassNotFound`] / [`LabError::WeaponNotFound`] for bad ids
/// - [`LabError::SimulationFailed`] when the standard's class does not resolve
pub fn review_class(
    document: &Document,
    selection: &Selection,
    class_id: &str,
    weapon_id: &str,
) -> Result<ClassReview> {
    let standard = selection
        .standard_unit(document)
        .ok_or(LabError::MissingStandard)?;
    if document.class(class_id).is_none() {
        return Err(LabError::ClassNotFound(class_id.to_string()));
    }
    if document.weapon(weapon_id).is_none() {
        return Err(LabError::WeaponNotFound(weapon_id.to_string()));
    }

    let attacker = synthetic_unit(class_id, weapon_id);
    let result = simulate(&attacker, standard, &selection.offense_context(document))
        .ok_or(LabError::SimulationFailed)?;
    let standard_hp = resolve_stats(&document.classes, standard).map_or(1.0, |s| s.hp);
    let ttk = time_to_kill(standard_hp, result.expected_damage);

    tracing::debug!(
        class = class_id,
        weapon = weapon_id,
        standard = %standard.id,
        ttk,
        "class review"
    );

    Ok(ClassReview {
        class_id: class_id.to_string(),
        weapon_id: weapon_id.to_string(),
        standard_id: standard.id.clone(),
        standard_hp,
        hit_verdict: grade(result.hit_chance, HIT_OK, HIT_WARN),
        ttk_verdict: grade(ttk, TTK_OK, TTK_WARN),
        expected_verdict: positive(result.expected_damage),
        damage_verdict: positive(result.damage),
        alerts: break_alerts(&result, ttk),
        advice: recommendations(&result, ttk),
        result,
        ttk,
    })
}

/// One graded duel figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Figure name.
    pub name: String,
    /// Raw value.
    pub value: f64,
    /// Grade.
    pub level: Verdict,
    /// What the figure means for play.
    pub hint: String,
}

impl Indicator {
    fn new(name: &str, value: f64, level: Verdict, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            value,
            level,
            hint: hint.to_string(),
        }
    }
}

/// Review of one placed unit striking another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelReview {
    /// Attacking unit.
    pub attacker_id: String,
    /// Defending unit.
    pub defender_id: String,
    /// Defender HP.
    pub defender_hp: f64,
    /// Simulated round.
    pub result: AttackResult,
    /// Rounds to kill the defender.
    pub ttk: f64,
    /// Hit, damage, expected damage and TTK, graded.
    pub indicators: Vec<Indicator>,
    /// Tuning advice, never empty.
    pub advice: Vec<Finding>,
}

fn duel_indicators(result: &AttackResult, ttk: f64) -> Vec<Indicator> {
    let warn_if = |bad: bool| if bad { Verdict::Warn } else { Verdict::Ok };
    let fail_if = |bad: bool| if bad { Verdict::Fail } else { Verdict::Ok };
    vec![
        Indicator::new(
            "hit",
            result.hit_chance,
            warn_if(result.hit_chance < LOW_HIT_THRESHOLD),
            "Reliability. Too low feels bad.",
        ),
        Indicator::new(
            "damage",
            result.damage,
            fail_if(result.damage == 0.0),
            "At 0 the attack does nothing.",
        ),
        Indicator::new(
            "expected",
            result.expected_damage,
            fail_if(result.expected_damage <= 0.0),
            "Real pace: hit x damage x attacks.",
        ),
        Indicator::new(
            "ttk",
            ttk,
            warn_if(ttk > TTK_OK.1),
            "Tempo. Aim for about 2 to 3 against the standard.",
        ),
    ]
}

/// Review the selected attacker striking the selected defender.
///
/// # Errors
///
/// - [`LabError::UnitNotFound`] when either id is unset or unknown
/// - [`LabError::SimulationFailed`] when a class or the weapon does not resolve
pub fn review_duel(document: &Document, selection: &Selection) -> Result<DuelReview> {
    let find = |id: Option<&str>| {
        let id = id.unwrap_or_default();
        document
            .unit(id)
            .ok_or_else(|| LabError::UnitNotFound(id.to_string()))
    };
    let attacker = find(selection.attacker_id.as_deref())?;
    let defender = find(selection.defender_id.as_deref())?;

    let result = simulate(attacker, defender, &selection.offense_context(document))
        .ok_or(LabError::SimulationFailed)?;
    let defender_hp = resolve_stats(&document.classes, defender).map_or(1.0, |s| s.hp);
    let ttk = time_to_kill(defender_hp, result.expected_damage);

    tracing::debug!(attacker = %attacker.id, defender = %defender.id, ttk, "duel review");

    Ok(DuelReview {
        attacker_id: attacker.id.clone(),
        defender_id: defender.id.clone(),
        defender_hp,
        indicators: duel_indicators(&result, ttk),
        advice: micro_recommendations(&result, ttk),
        result,
        ttk,
    })
}
