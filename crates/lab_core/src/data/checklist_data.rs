//! Designer checklist rules.

use serde::{Deserialize, Serialize};

use super::lenient::{self, finite_or};

/// Secondary rules layered on top of the range check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistExtra {
    /// Downgrade a passing verdict when the mage survives too long.
    #[serde(default)]
    pub check_mage_ehp_max: bool,
}

/// One rule: a named metric and its inclusive target band.
///
/// # Example JSON
///
/// ```json
/// { "id": "c1", "label": "Mage pressure", "metric": "mage_expected_damage",
///   "min": 4, "max": 7, "extra": { "checkMageEhpMax": true } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Unique rule identifier.
    pub id: String,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Metric name looked up in the computed metrics.
    #[serde(default)]
    pub metric: String,

    /// Lower edge of the band. Unset means unbounded.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper edge of the band. Unset means unbounded.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Optional secondary rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<ChecklistExtra>,
}

impl ChecklistItem {
    /// Resolved inclusive band; missing edges are open.
    #[must_use]
    pub fn band(&self) -> (f64, f64) {
        (
            finite_or(self.min, f64::NEG_INFINITY),
            finite_or(self.max, f64::INFINITY),
        )
    }

    /// Whether the mage survival downgrade applies to this rule.
    #[must_use]
    pub fn checks_mage_ehp(&self) -> bool {
        self.extra.as_ref().is_some_and(|e| e.check_mage_ehp_max)
    }
}
