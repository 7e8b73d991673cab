//! Class definitions and partial stat lines.

use serde::{Deserialize, Serialize};

use super::lenient;

/// A six-stat line where any field may be missing.
///
/// Used both for class base stats and for per-unit overrides. Resolution
/// into a complete block lives in [`crate::stats`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialStats {
    /// Hit points.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    /// Physical attack.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub atk: Option<f64>,
    /// Physical defense.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub def: Option<f64>,
    /// Magic attack.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub matk: Option<f64>,
    /// Magic defense.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mdef: Option<f64>,
    /// Speed.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub spd: Option<f64>,
}

impl PartialStats {
    /// Build a complete line, handy for tests and synthetic data.
    #[must_use]
    pub const fn full(hp: f64, atk: f64, def: f64, matk: f64, mdef: f64, spd: f64) -> Self {
        Self {
            hp: Some(hp),
            atk: Some(atk),
            def: Some(def),
            matk: Some(matk),
            mdef: Some(mdef),
            spd: Some(spd),
        }
    }
}

/// A character class.
///
/// # Example JSON
///
/// ```json
/// { "id": "mage", "name": "Mage", "role": "magic",
///   "baseStats": { "hp": 16, "atk": 1, "def": 1, "matk": 7, "mdef": 3, "spd": 5 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassData {
    /// Unique class identifier, referenced by units.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Free-text role tag (`dps`, `support`, ...). Only used as a hint when
    /// looking up archetypes.
    #[serde(default)]
    pub role: String,

    /// Base stats of every unit of this class.
    #[serde(default)]
    pub base_stats: PartialStats,
}

impl ClassData {
    /// Check whether the role tag matches, ignoring case and whitespace.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role.trim().eq_ignore_ascii_case(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_class() {
        let class: ClassData = serde_json::from_str(
            r#"{"id":"mage","name":"Mage","role":"Magic",
                "baseStats":{"hp":16,"atk":1,"def":"x","matk":7,"mdef":3}}"#,
        )
        .unwrap();

        assert_eq!(class.base_stats.hp, Some(16.0));
        assert_eq!(class.base_stats.def, None);
        assert_eq!(class.base_stats.spd, None);
        assert!(class.has_role("magic"));
        assert!(!class.has_role("support"));
    }

    #[test]
    fn test_missing_base_stats_default_to_empty() {
        let class: ClassData = serde_json::from_str(r#"{"id":"ghost"}"#).unwrap();
        assert_eq!(class.base_stats, PartialStats::default());
        assert!(class.name.is_empty());
    }
}
