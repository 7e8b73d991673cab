//! Designer checklist: named metrics checked against target bands.
//!
//! Metrics come from the class table and from archetype stand-ins (priest,
//! mage, tank) fighting the standard unit. Each checklist item reads one
//! metric and gets an `ok`/`warn`/`fail` verdict plus a tuning hint.
//!
//! # Verdict rule
//!
//! ```text
//! ok    min <= value <= max
//! warn  value finite and min * 0.9 <= value <= max * 1.1
//! fail  otherwise
//! ```
//!
//! Items flagged `checkMageEhpMax` additionally drop from `ok` to `warn`
//! when the mage survives more than [`MAGE_EHP_MAX_TURNS`] rounds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::archetype::{representative, Archetype};
use crate::combat::simulate;
use crate::data::{ChecklistItem, Document, UnitData};
use crate::error::{LabError, Result};
use crate::metrics::{effective_hp, finite_mean, mean, time_to_kill};
use crate::selection::Selection;
use crate::stats::resolve_stats;
use crate::tables::class_vs_standard;

/// Metric names produced by [`compute_metrics`].
pub mod names {
    /// Mean finite TTK of every class against the standard.
    pub const TTK_VS_STANDARD_AVG: &str = "ttk_vs_standard_avg";
    /// Mean hit chance of the classes with a finite TTK.
    pub const HIT_VS_STANDARD_AVG: &str = "hit_vs_standard_avg";
    /// Classes whose landed strikes do nothing to the standard.
    pub const ZERO_DAMAGE_CLASSES: &str = "zero_damage_classes";
    /// Priest expected damage per round against the standard.
    pub const PRIEST_EXPECTED_DAMAGE: &str = "priest_expected_damage";
    /// Mage expected damage per round against the standard.
    pub const MAGE_EXPECTED_DAMAGE: &str = "mage_expected_damage";
    /// Rounds for the mage to kill the standard.
    pub const MAGE_TTK: &str = "mage_ttk";
    /// Rounds the mage survives the standard.
    pub const MAGE_EHP_TURNS: &str = "mage_ehp_turns";
    /// Rounds the tank survives the standard.
    pub const TANK_SURVIVE_HITS: &str = "tank_survive_hits";
}

/// Relative slack around a band that still earns `warn`.
pub const WARN_BAND: f64 = 0.1;

/// Mage survival above this many rounds downgrades flagged items.
pub const MAGE_EHP_MAX_TURNS: f64 = 3.0;

/// Named metric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics {
    values: BTreeMap<String, f64>,
}

impl Metrics {
    /// Value of a metric, if it was computed.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Record a metric.
    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    /// Iterate metrics in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of computed metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A synthetic archetype unit with its resolved HP.
fn stand_in(document: &Document, archetype: Archetype) -> Option<(UnitData, f64)> {
    let class = archetype.resolve(document)?;
    let (unit, _) = representative(document, class)?;
    let hp = resolve_stats(&document.classes, &unit)?.hp;
    Some((unit, hp))
}

/// Compute every checklist metric for a selection.
///
/// For offense metrics the stand-in strikes the standard on the defender
/// terrain. For defense metrics the standard strikes the stand-in on the
/// attacker terrain. Stand-ins that cannot be simulated leave their metric out.
///
/// # Errors
///
/// [`LabError::MissingStandard`] when no standard unit resolves.
pub fn compute_metrics(document: &Document, selection: &Selection) -> Result<Metrics> {
    let standard = selection
        .standard_unit(document)
        .ok_or(LabError::MissingStandard)?;
    let offense = selection.offense_context(document);
    let defense = selection.defense_context(document);
    let standard_hp = resolve_stats(&document.classes, standard).map_or(1.0, |s| s.hp);

    let mut metrics = Metrics::default();

    let rows = class_vs_standard(&offense, standard);
    let finite: Vec<_> = rows.iter().filter(|r| r.ttk.is_finite()).collect();
    metrics.insert(
        names::TTK_VS_STANDARD_AVG,
        finite_mean(finite.iter().map(|r| r.ttk)).unwrap_or(f64::INFINITY),
    );
    metrics.insert(
        names::HIT_VS_STANDARD_AVG,
        mean(finite.iter().map(|r| r.hit)).unwrap_or(0.0),
    );
    metrics.insert(
        names::ZERO_DAMAGE_CLASSES,
        rows.iter().filter(|r| r.damage == 0.0).count() as f64,
    );

    if let Some((priest, _)) = stand_in(document, Archetype::Priest) {
        if let Some(result) = simulate(&priest, standard, &offense) {
            metrics.insert(names::PRIEST_EXPECTED_DAMAGE, result.expected_damage);
        }
    }

    if let Some((mage, mage_hp)) = stand_in(document, Archetype::Mage) {
        if let Some(result) = simulate(&mage, standard, &offense) {
            metrics.insert(names::MAGE_EXPECTED_DAMAGE, result.expected_damage);
            metrics.insert(
                names::MAGE_TTK,
                time_to_kill(standard_hp, result.expected_damage),
            );
        }
        if let Some(result) = simulate(standard, &mage, &defense) {
            metrics.insert(
                names::MAGE_EHP_TURNS,
                effective_hp(mage_hp, result.expected_damage),
            );
        }
    }

    if let Some((tank, tank_hp)) = stand_in(document, Archetype::Tank) {
        if let Some(result) = simulate(standard, &tank, &defense) {
            metrics.insert(
                names::TANK_SURVIVE_HITS,
                effective_hp(tank_hp, result.expected_damage),
            );
        }
    }

    tracing::debug!(count = metrics.len(), standard = %standard.id, "computed checklist metrics");
    Ok(metrics)
}

/// Checklist verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Inside the band.
    Ok,
    /// Close to the band, or inside it with a secondary concern.
    Warn,
    /// Off target.
    Fail,
}

impl Verdict {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Fail => "fail",
        }
    }
}

/// Where a value sits relative to its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Under `min`.
    Below,
    /// Inside `[min, max]`.
    Inside,
    /// Over `max`.
    Above,
}

impl Direction {
    /// Classify a value against a band.
    #[must_use]
    pub fn of(value: f64, min: f64, max: f64) -> Self {
        if value < min {
            Self::Below
        } else if value > max {
            Self::Above
        } else {
            Self::Inside
        }
    }
}

/// Range verdict for a value, without secondary rules.
#[must_use]
pub fn band_verdict(value: f64, min: f64, max: f64) -> Verdict {
    if min <= value && value <= max {
        Verdict::Ok
    } else if value.is_finite()
        && value >= min * (1.0 - WARN_BAND)
        && value <= max * (1.0 + WARN_BAND)
    {
        Verdict::Warn
    } else {
        Verdict::Fail
    }
}

/// Tuning hint for a metric that missed its band.
///
/// Picked by keyword in the metric name, so it is stable for a given
/// `(metric, direction)` pair.
#[must_use]
pub fn remediation(metric: &str, direction: Direction) -> &'static str {
    let metric = metric.to_ascii_lowercase();
    let has = |needle: &str| metric.contains(needle);

    match direction {
        Direction::Inside => "Within target, nothing to change.",
        Direction::Below if has("zero") => "Fewer zero-damage classes than expected; nothing to fix.",
        Direction::Above if has("zero") => {
            "Some classes deal 0 damage: lower DEF/MDEF of the standard (or its terrain), or raise ATK/MATK/might."
        }
        Direction::Below if has("ehp") || has("survive") => {
            "Dies too fast: raise HP or DEF/MDEF of the archetype, or lower the standard's might."
        }
        Direction::Above if has("ehp") || has("survive") => {
            "Survives too long: lower HP or DEF/MDEF of the archetype, or raise the standard's might."
        }
        Direction::Below if has("ttk") => {
            "Kills too fast: raise HP/DEF of the standard, or lower might or ATK/MATK."
        }
        Direction::Above if has("ttk") => {
            "Fights drag: +1 might (weapon) or +1 ATK/MATK (class), or -1 DEF/MDEF on the standard."
        }
        Direction::Below if has("hit") => "Raise weapon hit (+5 to +10) or lower terrain avoid.",
        Direction::Above if has("hit") => "Lower weapon hit or raise terrain avoid.",
        Direction::Below if has("damage") => {
            "Raise might or ATK/MATK, or lower DEF/MDEF of the standard."
        }
        Direction::Above if has("damage") => {
            "Lower might or ATK/MATK, or raise DEF/MDEF of the standard."
        }
        Direction::Below => "Under target: push the related stats up.",
        Direction::Above => "Over target: pull the related stats down.",
    }
}

/// Evaluation of one checklist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEvaluation {
    /// Item id.
    pub item_id: String,
    /// Item label.
    pub label: String,
    /// Metric name.
    pub metric: String,
    /// Final verdict.
    pub verdict: Verdict,
    /// Metric value; `None` when the metric was not computed.
    pub value: Option<f64>,
    /// Secondary-rule note, set when a downgrade happened.
    pub extra_note: Option<String>,
    /// Tuning hint.
    pub advice: String,
}

/// Evaluate one item against computed metrics.
#[must_use]
pub fn evaluate_item(item: &ChecklistItem, metrics: &Metrics) -> ItemEvaluation {
    let mut evaluation = ItemEvaluation {
        item_id: item.id.clone(),
        label: item.label.clone(),
        metric: item.metric.clone(),
        verdict: Verdict::Fail,
        value: None,
        extra_note: None,
        advice: format!("Metric '{}' is not computed; check its name.", item.metric),
    };

    let Some(value) = metrics.get(&item.metric) else {
        tracing::debug!(item = %item.id, metric = %item.metric, "unknown checklist metric");
        return evaluation;
    };

    let (min, max) = item.band();
    evaluation.value = Some(value);
    evaluation.verdict = band_verdict(value, min, max);
    evaluation.advice = remediation(&item.metric, Direction::of(value, min, max)).to_string();

    if item.checks_mage_ehp() && evaluation.verdict == Verdict::Ok {
        if let Some(ehp) = metrics.get(names::MAGE_EHP_TURNS) {
            if ehp > MAGE_EHP_MAX_TURNS {
                evaluation.verdict = Verdict::Warn;
                evaluation.extra_note = Some(format!(
                    "Mage survives {} rounds (> {MAGE_EHP_MAX_TURNS}): too tanky to be interesting.",
                    crate::metrics::format_rounds(ehp)
                ));
                evaluation.advice =
                    remediation(names::MAGE_EHP_TURNS, Direction::Above).to_string();
            }
        }
    }

    evaluation
}

/// Metrics plus the evaluation of every checklist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistReport {
    /// Computed metrics.
    pub metrics: Metrics,
    /// One evaluation per item, in checklist order.
    pub items: Vec<ItemEvaluation>,
}

impl ChecklistReport {
    /// Number of items with a given verdict.
    #[must_use]
    pub fn count(&self, verdict: Verdict) -> usize {
        self.items.iter().filter(|i| i.verdict == verdict).count()
    }

    /// Worst verdict across items; `Ok` for an empty checklist.
    #[must_use]
    pub fn worst(&self) -> Verdict {
        self.items
            .iter()
            .map(|i| i.verdict)
            .max()
            .unwrap_or(Verdict::Ok)
    }
}

/// Compute metrics and evaluate the document's checklist.
///
/// # Errors
///
/// [`LabError::MissingStandard`] when no standard unit resolves.
pub fn evaluate_checklist(document: &Document, selection: &Selection) -> Result<ChecklistReport> {
    let metrics = compute_metrics(document, selection)?;
    let items = document
        .checklist
        .iter()
        .map(|item| evaluate_item(item, &metrics))
        .collect();
    Ok(ChecklistReport { metrics, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ChecklistExtra;

    fn item(metric: &str, min: f64, max: f64) -> ChecklistItem {
        ChecklistItem {
            id: "c".to_string(),
            label: metric.to_string(),
            metric: metric.to_string(),
            min: Some(min),
            max: Some(max),
            extra: None,
        }
    }

    fn metrics(pairs: &[(&str, f64)]) -> Metrics {
        let mut m = Metrics::default();
        for (name, value) in pairs {
            m.insert(name, *value);
        }
        m
    }

    #[test]
    fn test_band_verdict() {
        assert_eq!(band_verdict(2.5, 2.0, 3.0), Verdict::Ok);
        assert_eq!(band_verdict(2.0, 2.0, 3.0), Verdict::Ok);
        assert_eq!(band_verdict(3.0, 2.0, 3.0), Verdict::Ok);
        assert_eq!(band_verdict(1.85, 2.0, 3.0), Verdict::Warn);
        assert_eq!(band_verdict(3.3, 2.0, 3.0), Verdict::Warn);
        assert_eq!(band_verdict(1.7, 2.0, 3.0), Verdict::Fail);
        assert_eq!(band_verdict(3.4, 2.0, 3.0), Verdict::Fail);
        assert_eq!(band_verdict(f64::INFINITY, 2.0, 3.0), Verdict::Fail);
    }

    #[test]
    fn test_open_band_edges() {
        let mut open = item("ttk_vs_standard_avg", 0.0, 0.0);
        open.min = None;
        open.max = Some(3.0);
        let eval = evaluate_item(&open, &metrics(&[("ttk_vs_standard_avg", -50.0)]));
        assert_eq!(eval.verdict, Verdict::Ok);
    }

    #[test]
    fn test_mage_ehp_downgrade() {
        let mut rule = item(names::MAGE_EXPECTED_DAMAGE, 4.0, 7.0);
        rule.extra = Some(ChecklistExtra {
            check_mage_ehp_max: true,
        });

        let tanky = metrics(&[(names::MAGE_EXPECTED_DAMAGE, 5.0), (names::MAGE_EHP_TURNS, 3.5)]);
        let eval = evaluate_item(&rule, &tanky);
        assert_eq!(eval.verdict, Verdict::Warn);
        assert!(eval.extra_note.is_some());

        let fragile = metrics(&[(names::MAGE_EXPECTED_DAMAGE, 5.0), (names::MAGE_EHP_TURNS, 2.0)]);
        let eval = evaluate_item(&rule, &fragile);
        assert_eq!(eval.verdict, Verdict::Ok);
        assert!(eval.extra_note.is_none());
    }

    #[test]
    fn test_downgrade_only_touches_ok() {
        let mut rule = item(names::MAGE_EXPECTED_DAMAGE, 4.0, 7.0);
        rule.extra = Some(ChecklistExtra {
            check_mage_ehp_max: true,
        });
        let m = metrics(&[(names::MAGE_EXPECTED_DAMAGE, 1.0), (names::MAGE_EHP_TURNS, 9.0)]);
        let eval = evaluate_item(&rule, &m);
        assert_eq!(eval.verdict, Verdict::Fail);
        assert!(eval.extra_note.is_none());
    }

    #[test]
    fn test_unknown_metric_fails() {
        let eval = evaluate_item(&item("fun_factor", 0.0, 1.0), &Metrics::default());
        assert_eq!(eval.verdict, Verdict::Fail);
        assert!(eval.value.is_none());
        assert!(eval.advice.contains("fun_factor"));
    }

    #[test]
    fn test_remediation_keywords() {
        assert!(remediation("hit_vs_standard_avg", Direction::Below).contains("hit"));
        assert!(remediation("ttk_vs_standard_avg", Direction::Above).contains("might"));
        assert!(remediation("tank_survive_hits", Direction::Below).contains("HP"));
        assert!(remediation("zero_damage_classes", Direction::Above).contains("0 damage"));
        assert!(remediation("mage_expected_damage", Direction::Below).contains("might"));
        assert_eq!(
            remediation("anything", Direction::Inside),
            remediation("hit", Direction::Inside)
        );
        // Deterministic for the same pair.
        assert_eq!(
            remediation("mage_ttk", Direction::Below),
            remediation("mage_ttk", Direction::Below)
        );
    }

    #[test]
    fn test_report_counts() {
        let report = ChecklistReport {
            metrics: Metrics::default(),
            items: vec![
                evaluate_item(&item("x", 0.0, 1.0), &metrics(&[("x", 0.5)])),
                evaluate_item(&item("x", 0.0, 1.0), &metrics(&[("x", 1.05)])),
                evaluate_item(&item("x", 0.0, 1.0), &metrics(&[("x", 5.0)])),
            ],
        };
        assert_eq!(report.count(Verdict::Ok), 1);
        assert_eq!(report.count(Verdict::Warn), 1);
        assert_eq!(report.count(Verdict::Fail), 1);
        assert_eq!(report.worst(), Verdict::Fail);
    }
}
