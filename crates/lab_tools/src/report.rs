//! Markdown balance report.
//!
//! One document, one selection: the class table, the unit overview and the
//! checklist, written for pasting into a design review.

use lab_core::aggregate::{aggregate_by_class, global_overview, ClassAggregate, GlobalOverview};
use lab_core::checklist::{evaluate_checklist, ChecklistReport, Verdict};
use lab_core::data::Document;
use lab_core::error::{LabError, Result};
use lab_core::metrics::{format_rounds, round2};
use lab_core::selection::Selection;
use lab_core::tables::{class_table, unit_table, ClassRow};
use serde::Serialize;

/// Everything the report prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    /// Standard unit the numbers are measured against.
    pub standard_id: String,
    /// Class-vs-standard rows.
    pub classes: Vec<ClassRow>,
    /// Per-class roll-up of the unit table.
    pub by_class: Vec<ClassAggregate>,
    /// Global roll-up of the unit table.
    pub overview: GlobalOverview,
    /// Checklist outcome.
    pub checklist: ChecklistReport,
}

impl BalanceReport {
    /// Compute every section.
    ///
    /// # Errors
    ///
    /// [`LabError::MissingStandard`] when no standard unit resolves.
    pub fn build(document: &Document, selection: &Selection) -> Result<Self> {
        let standard = selection
            .standard_unit(document)
            .ok_or(LabError::MissingStandard)?;
        let units = unit_table(document, selection)?;
        Ok(Self {
            standard_id: standard.id.clone(),
            classes: class_table(document, selection)?,
            by_class: aggregate_by_class(&units),
            overview: global_overview(&units),
            checklist: evaluate_checklist(document, selection)?,
        })
    }

    /// Generate markdown summary
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Balance Report\n\n");
        md.push_str(&format!("Standard unit: `{}`\n\n", self.standard_id));

        md.push_str("## Classes vs Standard\n\n");
        md.push_str("| Class | Weapon | Hit | Dmg | x | Expected | TTK |\n");
        md.push_str("|-------|--------|-----|-----|---|----------|-----|\n");
        for row in &self.classes {
            md.push_str(&format!(
                "| {} | {} | {:.0}% | {} | {} | {} | {} |\n",
                row.class_name,
                row.weapon_name,
                row.hit * 100.0,
                row.damage,
                row.attacks,
                round2(row.expected_damage),
                format_rounds(row.ttk)
            ));
        }

        md.push_str("\n## Units Overview\n\n");
        let o = &self.overview;
        md.push_str(&format!(
            "- Units: {}\n- Hit avg: {:.0}%\n- Expected avg: {}\n- TTK avg: {}\n",
            o.count,
            o.hit_avg * 100.0,
            round2(o.exp_avg),
            format_rounds(o.ttk_avg)
        ));
        md.push_str(&format!(
            "- Zero damage: {}, low hit: {}, one-shot: {}, slow: {}\n",
            o.zero_damage_count, o.low_hit_count, o.one_shot_count, o.slow_count
        ));

        if !self.by_class.is_empty() {
            md.push_str("\n| Class | Units | Hit | Expected | TTK |\n");
            md.push_str("|-------|-------|-----|----------|-----|\n");
            for agg in &self.by_class {
                md.push_str(&format!(
                    "| {} | {} | {:.0}% | {} | {} |\n",
                    agg.class_name,
                    agg.count,
                    agg.hit_avg * 100.0,
                    round2(agg.exp_avg),
                    format_rounds(agg.ttk_avg)
                ));
            }
        }

        if !self.checklist.items.is_empty() {
            md.push_str("\n## Checklist\n\n");
            for item in &self.checklist.items {
                let value = item
                    .value
                    .map_or_else(|| "n/a".to_string(), format_rounds);
                md.push_str(&format!(
                    "- **[{}]** {} (`{}` = {})\n",
                    item.verdict.label(),
                    item.label,
                    item.metric,
                    value
                ));
                if let Some(note) = &item.extra_note {
                    md.push_str(&format!("  - {note}\n"));
                }
                if item.verdict != Verdict::Ok {
                    md.push_str(&format!("  - {}\n", item.advice));
                }
            }
        }

        md.push_str(&format!(
            "\n---\n*{} ok, {} warn, {} fail*\n",
            self.checklist.count(Verdict::Ok),
            self.checklist.count(Verdict::Warn),
            self.checklist.count(Verdict::Fail)
        ));
        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_test_utils::fixtures::example_document;

    #[test]
    fn test_report_sections() {
        let doc = example_document();
        let report = BalanceReport::build(&doc, &Selection::from_config(&doc.config)).unwrap();
        assert_eq!(report.standard_id, "e1");
        assert_eq!(report.classes.len(), 4);
        assert_eq!(report.overview.count, 2);

        let md = report.to_markdown();
        assert!(md.starts_with("# Balance Report"));
        assert!(md.contains("## Classes vs Standard"));
        assert!(md.contains("| Mage | fire | 90% | 9 | 1 | 8.1 | 2.47 |"));
        assert!(md.contains("**[fail]** Priest stays soft"));
        assert!(md.contains("*4 ok, 1 warn, 2 fail*"));
    }

    #[test]
    fn test_report_requires_standard() {
        let doc = Document::default();
        assert_eq!(
            BalanceReport::build(&doc, &Selection::default()),
            Err(LabError::MissingStandard)
        );
    }
}
