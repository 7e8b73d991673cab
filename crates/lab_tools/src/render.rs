//! Plain-text views for the terminal.
//!
//! Every function returns a `String` so the CLI decides where it goes and
//! tests can check the text.

use lab_core::aggregate::{ClassAggregate, GlobalOverview};
use lab_core::checklist::{ChecklistReport, Verdict};
use lab_core::metrics::{format_rounds, round2};
use lab_core::review::{ClassReview, DuelReview, Finding};
use lab_core::stage_analysis::StageAnalysis;
use lab_core::tables::{ClassRow, UnitRow};

/// Badge shown in front of a leveled line.
#[must_use]
pub const fn badge(level: Verdict) -> &'static str {
    match level {
        Verdict::Ok => "[ok]  ",
        Verdict::Warn => "[warn]",
        Verdict::Fail => "[fail]",
    }
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

fn findings(out: &mut String, title: &str, items: &[Finding]) {
    out.push_str(&format!("{title}:\n"));
    for item in items {
        out.push_str(&format!("  {} {}\n", badge(item.level), item.message));
    }
}

/// Duel indicators and advice.
#[must_use]
pub fn duel(review: &DuelReview) -> String {
    let mut out = String::new();
    let terrain = review.result.terrain_name.as_deref().unwrap_or("no terrain");
    out.push_str(&format!(
        "{} -> {} ({terrain}), defender HP {}\n",
        review.attacker_id, review.defender_id, review.defender_hp
    ));
    for indicator in &review.indicators {
        let value = match indicator.name.as_str() {
            "hit" => percent(indicator.value),
            "ttk" => format_rounds(indicator.value),
            _ => format!("{}", round2(indicator.value)),
        };
        out.push_str(&format!(
            "  {} {:<9} {:>6}  {}\n",
            badge(indicator.level),
            indicator.name,
            value,
            indicator.hint
        ));
    }
    findings(&mut out, "Advice", &review.advice);
    out
}

/// Class review verdicts, alerts and advice.
#[must_use]
pub fn class_review(review: &ClassReview) -> String {
    let mut out = String::new();
    let r = &review.result;
    out.push_str(&format!(
        "{} with {} vs standard {} (HP {})\n",
        review.class_id, review.weapon_id, review.standard_id, review.standard_hp
    ));
    out.push_str(&format!(
        "  {} hit      {}\n",
        badge(review.hit_verdict),
        percent(r.hit_chance)
    ));
    out.push_str(&format!(
        "  {} damage   {} x{}\n",
        badge(review.damage_verdict),
        r.damage,
        r.attacks_count
    ));
    out.push_str(&format!(
        "  {} expected {}\n",
        badge(review.expected_verdict),
        round2(r.expected_damage)
    ));
    out.push_str(&format!(
        "  {} ttk      {}\n",
        badge(review.ttk_verdict),
        format_rounds(review.ttk)
    ));
    findings(&mut out, "Alerts", &review.alerts);
    findings(&mut out, "Advice", &review.advice);
    out
}

/// Class-vs-standard table.
#[must_use]
pub fn class_rows(rows: &[ClassRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} {:<14} {:>5} {:>5} {:>3} {:>8} {:>6}\n",
        "Class", "Weapon", "Hit", "Dmg", "x", "Exp", "TTK"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<14} {:<14} {:>5} {:>5} {:>3} {:>8} {:>6}\n",
            row.class_name,
            row.weapon_name,
            percent(row.hit),
            row.damage,
            row.attacks,
            round2(row.expected_damage),
            format_rounds(row.ttk)
        ));
    }
    out
}

/// Unit-vs-standard table.
#[must_use]
pub fn unit_rows(rows: &[UnitRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:<12} {:<12} {:>5} {:>5} {:>8} {:>6}\n",
        "Unit", "Class", "Weapon", "Hit", "Dmg", "Exp", "TTK"
    ));
    for row in rows {
        let flag = if row.zero_damage { "  (0 dmg)" } else { "" };
        out.push_str(&format!(
            "{:<8} {:<12} {:<12} {:>5} {:>5} {:>8} {:>6}{flag}\n",
            row.unit_id,
            row.class_name,
            row.weapon_name,
            percent(row.hit),
            row.damage,
            round2(row.expected_damage),
            format_rounds(row.ttk)
        ));
    }
    out
}

/// Per-class aggregate table.
#[must_use]
pub fn class_aggregates(aggregates: &[ClassAggregate]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} {:>3} {:>5} {:>8} {:>6} {:>5} {:>7}\n",
        "Class", "n", "Hit", "Exp", "TTK", "0dmg", "LowHit"
    ));
    for agg in aggregates {
        out.push_str(&format!(
            "{:<14} {:>3} {:>5} {:>8} {:>6} {:>5} {:>7}\n",
            agg.class_name,
            agg.count,
            percent(agg.hit_avg),
            round2(agg.exp_avg),
            format_rounds(agg.ttk_avg),
            agg.zero_damage_count,
            agg.low_hit_count
        ));
    }
    out
}

/// Global overview block.
#[must_use]
pub fn overview(overview: &GlobalOverview) -> String {
    format!(
        "Units: {}  hit avg {}  exp avg {}  ttk avg {}\n\
         Zero damage: {}  low hit: {}  one-shot: {}  slow: {}\n",
        overview.count,
        percent(overview.hit_avg),
        round2(overview.exp_avg),
        format_rounds(overview.ttk_avg),
        overview.zero_damage_count,
        overview.low_hit_count,
        overview.one_shot_count,
        overview.slow_count
    )
}

/// Stage threat table.
#[must_use]
pub fn stage(analysis: &StageAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Stage {} (radius {}), avg TTK vs nearest {}\n",
        analysis.stage_id,
        analysis.radius,
        format_rounds(analysis.avg_ttk)
    ));
    for p in &analysis.per_player {
        out.push_str(&format!(
            "  {:<8} HP {:>4}  threats {} [{}]  incoming {:>6}  survives {:>6}  ttk vs {} {}\n",
            p.unit_id,
            p.hp,
            p.threats,
            p.threat_ids.join(", "),
            round2(p.expected_incoming),
            format_rounds(p.survive_turns),
            p.nearest_enemy_id.as_deref().unwrap_or("-"),
            format_rounds(p.ttk_vs_nearest)
        ));
    }
    out
}

/// Checklist verdicts with values and advice.
#[must_use]
pub fn checklist(report: &ChecklistReport) -> String {
    let mut out = String::new();
    for item in &report.items {
        let value = item
            .value
            .map_or_else(|| "n/a".to_string(), format_rounds);
        out.push_str(&format!(
            "{} {:<28} {:<24} {:>6}\n",
            badge(item.verdict),
            item.label,
            item.metric,
            value
        ));
        if let Some(note) = &item.extra_note {
            out.push_str(&format!("       {note}\n"));
        }
        if item.verdict != Verdict::Ok {
            out.push_str(&format!("       -> {}\n", item.advice));
        }
    }
    out.push_str(&format!(
        "{} ok, {} warn, {} fail\n",
        report.count(Verdict::Ok),
        report.count(Verdict::Warn),
        report.count(Verdict::Fail)
    ));
    out
}
