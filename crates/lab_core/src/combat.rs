//! Expected-value attack simulation.
//!
//! This module turns an attacker, a defender and the defender's terrain into
//! one combat round's numbers:
//! - Hit chance: weapon hit minus terrain avoid, clamped to [0, 1]
//! - Raw damage: attack stat + might minus the matching defense, floored at 0
//! - Attack count: doubled when the attacker outspeeds the defender's base speed
//! - Crit: folded in as an expected multiplier, never rolled
//!
//! Nothing here is random. Every call recomputes from the document.

use serde::{Deserialize, Serialize};

use crate::data::{Config, Document, UnitData, WeaponData, WeaponKind};
use crate::stats::{apply_terrain, resolve_stats, DefenderStats, StatBlock};

/// Speed lead needed over the defender's base speed to strike twice.
pub const DOUBLING_SPEED_GAP: f64 = 4.0;

/// Toggles that change how a round resolves.
///
/// Passed explicitly into every simulation so no call depends on ambient
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatRules {
    /// Fast attackers strike twice.
    pub enable_doubling: bool,
    /// Weapon crit contributes to expected damage.
    pub enable_crit: bool,
    /// Damage multiplier of a critical hit.
    pub crit_multiplier: f64,
}

impl CombatRules {
    /// Rules as stored in the document config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            enable_doubling: config.enable_doubling,
            enable_crit: config.enable_crit,
            crit_multiplier: config.crit_multiplier(),
        }
    }

    /// Builder method to toggle doubling.
    #[must_use]
    pub const fn with_doubling(mut self, enabled: bool) -> Self {
        self.enable_doubling = enabled;
        self
    }

    /// Builder method to toggle crit.
    #[must_use]
    pub const fn with_crit(mut self, enabled: bool) -> Self {
        self.enable_crit = enabled;
        self
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything a simulation reads besides the two units.
#[derive(Debug, Clone, Copy)]
pub struct AttackContext<'a> {
    /// Catalog snapshot for stat, weapon and terrain lookups.
    pub document: &'a Document,
    /// Terrain the defender stands on. Unknown or absent means no bonus.
    pub defender_terrain_id: Option<&'a str>,
    /// Round resolution toggles.
    pub rules: CombatRules,
}

impl<'a> AttackContext<'a> {
    /// Context with no defender terrain.
    #[must_use]
    pub const fn new(document: &'a Document, rules: CombatRules) -> Self {
        Self {
            document,
            defender_terrain_id: None,
            rules,
        }
    }

    /// Builder method to place the defender on a terrain.
    #[must_use]
    pub const fn on_terrain(mut self, terrain_id: Option<&'a str>) -> Self {
        self.defender_terrain_id = terrain_id;
        self
    }
}

/// Outcome of one simulated attack round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    /// Probability a single strike lands, in [0, 1].
    pub hit_chance: f64,
    /// Damage of one landed strike. Negative for healing.
    pub damage: f64,
    /// Strikes per round (1 or 2).
    pub attacks_count: u32,
    /// Expected crit multiplier applied to the round.
    pub crit_factor: f64,
    /// `hit_chance * damage * attacks_count * crit_factor`.
    pub expected_damage: f64,
    /// Damage was resolved against MDEF.
    pub is_magic: bool,
    /// The weapon heals instead of damaging.
    pub is_heal: bool,
    /// Display name of the defender's terrain, if it resolved.
    pub terrain_name: Option<String>,
}

impl AttackResult {
    /// Whether the round does any harm. Healing and zero damage do not.
    #[must_use]
    pub fn is_offensive(&self) -> bool {
        self.expected_damage > 0.0
    }
}

/// Clamp to [0, 1].
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Strikes per round.
///
/// Compares against the defender's base speed; terrain never changes speed.
#[must_use]
pub fn attacks_count(attacker: &StatBlock, defender_base: &StatBlock, rules: &CombatRules) -> u32 {
    if rules.enable_doubling && attacker.spd >= defender_base.spd + DOUBLING_SPEED_GAP {
        2
    } else {
        1
    }
}

/// Damage of one landed strike.
#[must_use]
pub fn strike_damage(weapon: &WeaponData, attacker: &StatBlock, defender: &DefenderStats) -> f64 {
    let might = weapon.might();
    match weapon.kind {
        WeaponKind::Physical => (attacker.atk + might - defender.stats.def).max(0.0),
        WeaponKind::Magic => (attacker.matk + might - defender.stats.mdef).max(0.0),
        WeaponKind::Heal => -(attacker.atk + might).max(0.0),
        // Unknown types resolve physically.
        WeaponKind::Unknown => (attacker.atk + might - defender.stats.def).max(0.0),
    }
}

/// Expected crit multiplier: `1 + chance * (multiplier - 1)`.
#[must_use]
pub fn crit_factor(weapon: &WeaponData, rules: &CombatRules) -> f64 {
    let chance = if rules.enable_crit {
        clamp01(weapon.crit() / 100.0)
    } else {
        0.0
    };
    1.0 + chance * (rules.crit_multiplier - 1.0)
}

/// Simulate one round of `attacker` striking `defender`.
///
/// Returns `None` when the attacker's class, the defender's class or the
/// attacker's weapon does not resolve. Never mutates its inputs.
#[must_use]
pub fn simulate(
    attacker: &UnitData,
    defender: &UnitData,
    ctx: &AttackContext<'_>,
) -> Option<AttackResult> {
    let doc = ctx.document;
    let attacker_stats = resolve_stats(&doc.classes, attacker)?;
    let defender_base = resolve_stats(&doc.classes, defender)?;
    let Some(weapon) = doc.weapon(&attacker.weapon_id) else {
        tracing::trace!(
            unit = %attacker.id,
            weapon = %attacker.weapon_id,
            "weapon does not resolve"
        );
        return None;
    };

    let terrain = ctx.defender_terrain_id.and_then(|id| doc.terrain(id));
    let defender_stats = apply_terrain(&defender_base, terrain);

    let hit_chance = clamp01((weapon.hit() - defender_stats.avoid) / 100.0);
    let attacks = attacks_count(&attacker_stats, &defender_base, &ctx.rules);
    let damage = strike_damage(weapon, &attacker_stats, &defender_stats);
    let crit = crit_factor(weapon, &ctx.rules);
    let expected_damage = hit_chance * damage * f64::from(attacks) * crit;

    Some(AttackResult {
        hit_chance,
        damage,
        attacks_count: attacks,
        crit_factor: crit,
        expected_damage,
        is_magic: weapon.kind == WeaponKind::Magic,
        is_heal: weapon.kind == WeaponKind::Heal,
        terrain_name: terrain.map(|t| t.name.clone()),
    })
}
