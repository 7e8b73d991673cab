//! Weapon definitions.

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient::{self, finite_or};

/// How a weapon resolves damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    /// ATK + might against DEF.
    #[default]
    Physical,
    /// MATK + might against MDEF.
    Magic,
    /// ATK + might as healing, never reduced by defense.
    Heal,
    /// Any type the engine does not know, string or not. Resolved like
    /// `Physical`.
    Unknown,
}

impl WeaponKind {
    /// Parse an editor type tag. Unknown tags are [`WeaponKind::Unknown`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "physical" => Self::Physical,
            "magic" => Self::Magic,
            "heal" => Self::Heal,
            _ => Self::Unknown,
        }
    }

    /// Short label for tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Magic => "magic",
            Self::Heal => "heal",
            Self::Unknown => "unknown",
        }
    }
}

impl<'de> Deserialize<'de> for WeaponKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = lenient::text(deserializer)?;
        Ok(tag.as_deref().map_or(Self::Unknown, Self::from_tag))
    }
}

/// A weapon.
///
/// # Example JSON
///
/// ```json
/// { "id": "fire", "name": "Fire", "type": "magic", "might": 4, "hit": 90,
///   "crit": 0, "rangeMin": 1, "rangeMax": 2 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponData {
    /// Unique weapon identifier, referenced by units.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Damage resolution kind.
    #[serde(rename = "type", default)]
    pub kind: WeaponKind,

    /// Flat power added to the wielder's attack stat. May be negative.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub might: Option<f64>,

    /// Accuracy in percentage points, before the defender's avoid.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hit: Option<f64>,

    /// Critical chance in percentage points.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub crit: Option<f64>,

    /// Closest tile distance this weapon reaches.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub range_min: Option<f64>,

    /// Farthest tile distance this weapon reaches.
    #[serde(default, with = "lenient", skip_serializing_if = "Option::is_none")]
    pub range_max: Option<f64>,
}

impl WeaponData {
    /// Might, 0 when unset.
    #[must_use]
    pub fn might(&self) -> f64 {
        finite_or(self.might, 0.0)
    }

    /// Hit in percentage points, 0 when unset.
    #[must_use]
    pub fn hit(&self) -> f64 {
        finite_or(self.hit, 0.0)
    }

    /// Crit in percentage points, 0 when unset.
    #[must_use]
    pub fn crit(&self) -> f64 {
        finite_or(self.crit, 0.0)
    }

    /// Inclusive distance band, each end defaulting to 1.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (finite_or(self.range_min, 1.0), finite_or(self.range_max, 1.0))
    }

    /// Check whether a tile distance falls inside the weapon's band.
    #[must_use]
    pub fn reaches(&self, distance: u32) -> bool {
        let (min, max) = self.range();
        let distance = f64::from(distance);
        distance >= min && distance <= max
    }
}
