//! Roll-ups of unit rows into per-class and global summaries.
//!
//! Averages of TTK only include finite values; infinite rows still count
//! toward `count` and the flag counters.

use serde::{Deserialize, Serialize};

use crate::metrics::{finite_mean, mean};
use crate::tables::UnitRow;

/// Hit chance below which misses feel frustrating.
pub const LOW_HIT_THRESHOLD: f64 = 0.5;

/// A finite TTK below this is a likely one-round kill.
pub const ONE_SHOT_TTK: f64 = 1.2;

/// A TTK above this makes fights drag.
pub const SLOW_TTK: f64 = 4.0;

/// Summary of all rows sharing a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAggregate {
    /// Class id.
    pub class_id: String,
    /// Class display name.
    pub class_name: String,
    /// Rows of this class.
    pub count: u32,
    /// Mean hit chance.
    pub hit_avg: f64,
    /// Mean expected damage.
    pub exp_avg: f64,
    /// Mean of finite TTKs; infinite when none are finite.
    pub ttk_avg: f64,
    /// Rows dealing zero damage.
    pub zero_damage_count: u32,
    /// Rows under [`LOW_HIT_THRESHOLD`].
    pub low_hit_count: u32,
}

/// Summary across every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalOverview {
    /// Rows considered.
    pub count: u32,
    /// Mean hit chance.
    pub hit_avg: f64,
    /// Mean expected damage.
    pub exp_avg: f64,
    /// Mean of finite TTKs; infinite when none are finite.
    pub ttk_avg: f64,
    /// Rows dealing zero damage.
    pub zero_damage_count: u32,
    /// Rows under [`LOW_HIT_THRESHOLD`].
    pub low_hit_count: u32,
    /// Rows with finite TTK under [`ONE_SHOT_TTK`] and positive expected damage.
    pub one_shot_count: u32,
    /// Rows with finite TTK over [`SLOW_TTK`].
    pub slow_count: u32,
}

fn count_where<'a>(
    rows: impl IntoIterator<Item = &'a UnitRow>,
    pred: impl Fn(&UnitRow) -> bool,
) -> u32 {
    let count = rows.into_iter().filter(|row| pred(row)).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn is_low_hit(row: &UnitRow) -> bool {
    row.hit < LOW_HIT_THRESHOLD
}

fn is_one_shot(row: &UnitRow) -> bool {
    row.ttk.is_finite() && row.ttk < ONE_SHOT_TTK && row.expected_damage > 0.0
}

fn is_slow(row: &UnitRow) -> bool {
    row.ttk.is_finite() && row.ttk > SLOW_TTK
}

/// Group rows by class, highest mean expected damage first.
#[must_use]
pub fn aggregate_by_class(rows: &[UnitRow]) -> Vec<ClassAggregate> {
    let mut groups: Vec<(&str, Vec<&UnitRow>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(id, _)| *id == row.class_id) {
            Some((_, members)) => members.push(row),
            None => groups.push((row.class_id.as_str(), vec![row])),
        }
    }

    let mut aggregates: Vec<ClassAggregate> = groups
        .into_iter()
        .map(|(class_id, members)| ClassAggregate {
            class_id: class_id.to_string(),
            class_name: members[0].class_name.clone(),
            count: count_where(members.iter().copied(), |_| true),
            hit_avg: mean(members.iter().map(|r| r.hit)).unwrap_or(0.0),
            exp_avg: mean(members.iter().map(|r| r.expected_damage)).unwrap_or(0.0),
            ttk_avg: finite_mean(members.iter().map(|r| r.ttk)).unwrap_or(f64::INFINITY),
            zero_damage_count: count_where(members.iter().copied(), |r| r.zero_damage),
            low_hit_count: count_where(members.iter().copied(), is_low_hit),
        })
        .collect();

    aggregates.sort_by(|a, b| b.exp_avg.total_cmp(&a.exp_avg));
    aggregates
}

/// Summarize every row at once.
#[must_use]
pub fn global_overview(rows: &[UnitRow]) -> GlobalOverview {
    GlobalOverview {
        count: count_where(rows, |_| true),
        hit_avg: mean(rows.iter().map(|r| r.hit)).unwrap_or(0.0),
        exp_avg: mean(rows.iter().map(|r| r.expected_damage)).unwrap_or(0.0),
        ttk_avg: finite_mean(rows.iter().map(|r| r.ttk)).unwrap_or(f64::INFINITY),
        zero_damage_count: count_where(rows, |r| r.zero_damage),
        low_hit_count: count_where(rows, is_low_hit),
        one_shot_count: count_where(rows, is_one_shot),
        slow_count: count_where(rows, is_slow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Side;

    fn row(class_id: &str, hit: f64, expected: f64, ttk: f64) -> UnitRow {
        UnitRow {
            unit_id: format!("{class_id}-{expected}"),
            unit_name: String::new(),
            side: Side::Player,
            class_id: class_id.to_string(),
            class_name: class_id.to_uppercase(),
            weapon_name: String::new(),
            hit,
            damage: if expected > 0.0 { 5.0 } else { 0.0 },
            attacks: 1,
            expected_damage: expected,
            ttk,
            zero_damage: expected <= 0.0,
        }
    }

    #[test]
    fn test_ttk_average_excludes_infinity() {
        let rows = vec![
            row("a", 0.8, 5.0, 2.0),
            row("a", 0.8, 2.5, 4.0),
            row("a", 0.8, 0.0, f64::INFINITY),
        ];
        let overview = global_overview(&rows);
        assert_eq!(overview.count, 3);
        assert_eq!(overview.ttk_avg, 3.0);

        let by_class = aggregate_by_class(&rows);
        assert_eq!(by_class.len(), 1);
        assert_eq!(by_class[0].count, 3);
        assert_eq!(by_class[0].ttk_avg, 3.0);
        assert_eq!(by_class[0].zero_damage_count, 1);
    }

    #[test]
    fn test_by_class_sorted_by_exp_avg() {
        let rows = vec![
            row("slow", 0.9, 2.0, 9.0),
            row("fast", 0.4, 10.0, 1.0),
            row("slow", 0.9, 4.0, 4.5),
        ];
        let by_class = aggregate_by_class(&rows);
        assert_eq!(by_class[0].class_id, "fast");
        assert_eq!(by_class[0].low_hit_count, 1);
        assert_eq!(by_class[1].class_id, "slow");
        assert_eq!(by_class[1].exp_avg, 3.0);
        assert_eq!(by_class[1].class_name, "SLOW");
    }

    #[test]
    fn test_overview_flags() {
        let rows = vec![
            row("a", 0.45, 20.0, 1.0),
            row("a", 0.9, 4.0, 5.0),
            row("a", 0.9, 0.0, f64::INFINITY),
            row("a", 0.7, 8.0, 2.5),
        ];
        let overview = global_overview(&rows);
        assert_eq!(overview.low_hit_count, 1);
        assert_eq!(overview.one_shot_count, 1);
        assert_eq!(overview.slow_count, 1, "infinite TTK is not counted as slow");
        assert_eq!(overview.zero_damage_count, 1);
    }

    #[test]
    fn test_empty_rows() {
        let overview = global_overview(&[]);
        assert_eq!(overview.count, 0);
        assert_eq!(overview.hit_avg, 0.0);
        assert_eq!(overview.ttk_avg, f64::INFINITY);
        assert!(aggregate_by_class(&[]).is_empty());
    }
}
