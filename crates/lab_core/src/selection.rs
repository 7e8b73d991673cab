//! Caller selections: which units duel, on what terrain, under which toggles.

use serde::{Deserialize, Serialize};

use crate::combat::{AttackContext, CombatRules};
use crate::data::{Config, Document, UnitData};

/// Which units a roster table iterates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Player units only.
    Player,
    /// Enemy units only.
    Enemy,
    /// Every unit.
    #[default]
    All,
}

impl Scope {
    /// Check whether a unit falls inside this scope.
    #[must_use]
    pub fn includes(self, unit: &UnitData) -> bool {
        match self {
            Self::Player => unit.is_player(),
            Self::Enemy => unit.is_enemy(),
            Self::All => true,
        }
    }
}

/// Plain parameters picked in the UI.
///
/// The defender doubles as the "standard" unit every comparison table is
/// measured against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Duel attacker.
    #[serde(default)]
    pub attacker_id: Option<String>,
    /// Duel defender and standard unit.
    #[serde(default)]
    pub defender_id: Option<String>,
    /// Terrain under the attacker. Used when the standard strikes back.
    #[serde(default)]
    pub attacker_terrain_id: Option<String>,
    /// Terrain under the defender.
    #[serde(default)]
    pub defender_terrain_id: Option<String>,
    /// Stage for threat analysis.
    #[serde(default)]
    pub stage_id: Option<String>,
    /// Roster filter for unit tables.
    #[serde(default)]
    pub scope: Scope,
    /// Doubling toggle.
    #[serde(default)]
    pub enable_doubling: bool,
    /// Crit toggle.
    #[serde(default)]
    pub enable_crit: bool,
}

impl Selection {
    /// Selection with toggles mirroring the document config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            enable_doubling: config.enable_doubling,
            enable_crit: config.enable_crit,
            ..Self::default()
        }
    }

    /// Builder method to pick the attacker.
    #[must_use]
    pub fn with_attacker(mut self, id: impl Into<String>) -> Self {
        self.attacker_id = Some(id.into());
        self
    }

    /// Builder method to pick the defender.
    #[must_use]
    pub fn with_defender(mut self, id: impl Into<String>) -> Self {
        self.defender_id = Some(id.into());
        self
    }

    /// Builder method to set the attacker's terrain.
    #[must_use]
    pub fn with_attacker_terrain(mut self, id: impl Into<String>) -> Self {
        self.attacker_terrain_id = Some(id.into());
        self
    }

    /// Builder method to set the defender's terrain.
    #[must_use]
    pub fn with_defender_terrain(mut self, id: impl Into<String>) -> Self {
        self.defender_terrain_id = Some(id.into());
        self
    }

    /// Builder method to pick a stage.
    #[must_use]
    pub fn with_stage(mut self, id: impl Into<String>) -> Self {
        self.stage_id = Some(id.into());
        self
    }

    /// Builder method to set the roster scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Builder method to set both toggles.
    #[must_use]
    pub fn with_toggles(mut self, doubling: bool, crit: bool) -> Self {
        self.enable_doubling = doubling;
        self.enable_crit = crit;
        self
    }

    /// Combat rules: selection toggles with the config's crit multiplier.
    #[must_use]
    pub fn rules(&self, config: &Config) -> CombatRules {
        CombatRules::from_config(config)
            .with_doubling(self.enable_doubling)
            .with_crit(self.enable_crit)
    }

    /// Context for strikes against the defender's terrain.
    #[must_use]
    pub fn offense_context<'a>(&'a self, document: &'a Document) -> AttackContext<'a> {
        AttackContext::new(document, self.rules(&document.config))
            .on_terrain(self.defender_terrain_id.as_deref())
    }

    /// Context for strikes landing on the attacker's terrain.
    #[must_use]
    pub fn defense_context<'a>(&'a self, document: &'a Document) -> AttackContext<'a> {
        AttackContext::new(document, self.rules(&document.config))
            .on_terrain(self.attacker_terrain_id.as_deref())
    }

    /// The standard unit: the selected defender, else the first enemy,
    /// else the first unit.
    #[must_use]
    pub fn standard_unit<'d>(&self, document: &'d Document) -> Option<&'d UnitData> {
        self.defender_id
            .as_deref()
            .and_then(|id| document.unit(id))
            .or_else(|| document.units.iter().find(|u| u.is_enemy()))
            .or_else(|| document.units.first())
    }
}
