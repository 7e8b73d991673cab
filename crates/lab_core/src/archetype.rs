//! Synthetic attackers that stand in for a whole class.
//!
//! Tables and checklist metrics compare classes rather than placed units, so
//! they build a throwaway level-1 unit per class and hand it a weapon picked
//! by a simple heuristic. None of this is known to the simulator itself.

use serde::{Deserialize, Serialize};

use crate::data::{
    lenient::finite_or, ClassData, Document, Position, Side, UnitData, WeaponData, WeaponKind,
};

/// Id given to synthetic units.
pub const SYNTHETIC_UNIT_ID: &str = "tmp";

/// Pick the weapon that best represents a class.
///
/// Casters (MATK >= ATK) take the first magic weapon; everyone else, and
/// casters when no magic weapon exists, take the first physical weapon;
/// failing both, the first weapon in the catalog.
#[must_use]
pub fn preferred_weapon<'d>(
    weapons: &'d [WeaponData],
    class: &ClassData,
) -> Option<&'d WeaponData> {
    let atk = finite_or(class.base_stats.atk, 0.0);
    let matk = finite_or(class.base_stats.matk, 0.0);
    let first_of = |kind: WeaponKind| weapons.iter().find(|w| w.kind == kind);

    let magic = if matk >= atk {
        first_of(WeaponKind::Magic)
    } else {
        None
    };
    magic
        .or_else(|| first_of(WeaponKind::Physical))
        .or_else(|| weapons.first())
}

/// A level-1 player unit of `class_id` wielding `weapon_id`.
#[must_use]
pub fn synthetic_unit(class_id: &str, weapon_id: &str) -> UnitData {
    UnitData {
        id: SYNTHETIC_UNIT_ID.to_string(),
        name: SYNTHETIC_UNIT_ID.to_uppercase(),
        class_id: class_id.to_string(),
        weapon_id: weapon_id.to_string(),
        side: Side::Player,
        level: 1,
        position: Position::default(),
        stats_override: None,
    }
}

/// A synthetic unit for `class` with its preferred weapon.
///
/// `None` when the weapon catalog is empty.
#[must_use]
pub fn representative<'d>(
    document: &'d Document,
    class: &ClassData,
) -> Option<(UnitData, &'d WeaponData)> {
    let weapon = preferred_weapon(&document.weapons, class)?;
    Some((synthetic_unit(&class.id, &weapon.id), weapon))
}

/// Roles the checklist measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Support caster; should hit softly.
    Priest,
    /// Glass-cannon caster.
    Mage,
    /// Durable front-liner.
    Tank,
}

impl Archetype {
    /// Class id that matches this archetype outright.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Priest => "priest",
            Self::Mage => "mage",
            Self::Tank => "tank",
        }
    }

    /// Role tags accepted when no class id matches.
    #[must_use]
    pub const fn role_tags(self) -> &'static [&'static str] {
        match self {
            Self::Priest => &["support", "healer", "priest"],
            Self::Mage => &["magic", "mage", "caster"],
            Self::Tank => &["tank", "bruiser", "defender", "armor"],
        }
    }

    /// Resolve to a class: by id, then by role, then the first class.
    #[must_use]
    pub fn resolve(self, document: &Document) -> Option<&ClassData> {
        document
            .class(self.key())
            .or_else(|| {
                document
                    .classes
                    .iter()
                    .find(|c| self.role_tags().iter().any(|tag| c.has_role(tag)))
            })
            .or_else(|| {
                tracing::debug!(archetype = self.key(), "no matching class, using first");
                document.classes.first()
            })
    }
}
