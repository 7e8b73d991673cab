//! Static threat estimate for a placed stage.
//!
//! For each player unit: which enemies are within the awareness radius and
//! can actually reach it with their weapon, how much expected damage that
//! adds up to, and how many rounds the player survives it. Also how fast
//! each player kills the closest enemy.
//!
//! There is no pathfinding and no turn order. All strikes here resolve on
//! plain ground.

use serde::{Deserialize, Serialize};

use crate::combat::{simulate, AttackContext, CombatRules};
use crate::data::{Document, StageData, UnitData};
use crate::error::{LabError, Result};
use crate::metrics::{effective_hp, finite_mean, time_to_kill};
use crate::selection::Selection;
use crate::stats::resolve_stats;

/// Awareness radius used when the caller has no preference.
pub const DEFAULT_AWARENESS_RADIUS: u32 = 6;

/// Threat picture for one player unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerThreat {
    /// Player unit id.
    pub unit_id: String,
    /// Player unit display name.
    pub unit_name: String,
    /// Player HP.
    pub hp: f64,
    /// Terrain id of the player's tile, when the grid is well formed.
    pub terrain_id: Option<String>,
    /// Enemies in radius whose weapon reaches the player.
    pub threats: u32,
    /// Ids of those enemies.
    pub threat_ids: Vec<String>,
    /// Summed expected damage per round from threats.
    pub expected_incoming: f64,
    /// Rounds survived under that pressure.
    pub survive_turns: f64,
    /// Closest enemy by Manhattan distance, ignoring range and radius.
    pub nearest_enemy_id: Option<String>,
    /// Rounds for this player to kill the closest enemy.
    pub ttk_vs_nearest: f64,
}

/// Threat picture for a whole stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageAnalysis {
    /// Stage id.
    pub stage_id: String,
    /// Radius the estimate was computed with.
    pub radius: u32,
    /// One entry per resolvable player unit, in stage order.
    pub per_player: Vec<PlayerThreat>,
    /// Mean finite TTK of players against their closest enemy; infinite
    /// when no player has a finite one.
    pub avg_ttk: f64,
}

fn nearest<'a>(player: &UnitData, enemies: &[&'a UnitData]) -> Option<&'a UnitData> {
    enemies
        .iter()
        .copied()
        .min_by_key(|e| player.position.manhattan_distance(e.position))
}

fn assess_player(
    player: &UnitData,
    hp: f64,
    enemies: &[&UnitData],
    stage: &StageData,
    radius: u32,
    ctx: &AttackContext<'_>,
) -> PlayerThreat {
    let doc = ctx.document;
    let mut threat_ids = Vec::new();
    let mut expected_incoming = 0.0;

    for enemy in enemies {
        let distance = player.position.manhattan_distance(enemy.position);
        if distance > radius {
            continue;
        }
        let Some(weapon) = doc.weapon(&enemy.weapon_id) else {
            continue;
        };
        if !weapon.reaches(distance) {
            continue;
        }
        let Some(result) = simulate(enemy, player, ctx) else {
            continue;
        };
        expected_incoming += result.expected_damage;
        threat_ids.push(enemy.id.clone());
    }

    let closest = nearest(player, enemies);
    let ttk_vs_nearest = closest
        .and_then(|enemy| {
            let enemy_hp = resolve_stats(&doc.classes, enemy)?.hp;
            let result = simulate(player, enemy, ctx)?;
            Some(time_to_kill(enemy_hp, result.expected_damage))
        })
        .unwrap_or(f64::INFINITY);

    PlayerThreat {
        unit_id: player.id.clone(),
        unit_name: player.name.clone(),
        hp,
        terrain_id: stage
            .terrain_at(player.position.x, player.position.y)
            .map(str::to_string),
        threats: u32::try_from(threat_ids.len()).unwrap_or(u32::MAX),
        threat_ids,
        expected_incoming,
        survive_turns: effective_hp(hp, expected_incoming),
        nearest_enemy_id: closest.map(|e| e.id.clone()),
        ttk_vs_nearest,
    }
}

/// Estimate threat on a stage.
#[must_use]
pub fn analyze_stage(
    document: &Document,
    stage: &StageData,
    radius: u32,
    rules: CombatRules,
) -> StageAnalysis {
    let ctx = AttackContext::new(document, rules);
    let units: Vec<&UnitData> = document.units_on(stage).collect();
    let enemies: Vec<&UnitData> = units.iter().copied().filter(|u| u.is_enemy()).collect();

    let per_player: Vec<PlayerThreat> = units
        .iter()
        .filter(|u| u.is_player())
        .filter_map(|player| {
            let Some(stats) = resolve_stats(&document.classes, player) else {
                tracing::debug!(unit = %player.id, "player class does not resolve");
                return None;
            };
            Some(assess_player(player, stats.hp, &enemies, stage, radius, &ctx))
        })
        .collect();

    let avg_ttk = if enemies.is_empty() {
        f64::INFINITY
    } else {
        finite_mean(per_player.iter().map(|p| p.ttk_vs_nearest)).unwrap_or(f64::INFINITY)
    };

    StageAnalysis {
        stage_id: stage.id.clone(),
        radius,
        per_player,
        avg_ttk,
    }
}

/// Estimate threat on the selection's stage.
///
/// # Errors
///
/// [`LabError::StageNotFound`] when the stage id is unset or unknown.
pub fn analyze_selected_stage(
    document: &Document,
    selection: &Selection,
    radius: u32,
) -> Result<StageAnalysis> {
    let id = selection.stage_id.as_deref().unwrap_or_default();
    let stage = document
        .stage(id)
        .ok_or_else(|| LabError::StageNotFound(id.to_string()))?;
    Ok(analyze_stage(
        document,
        stage,
        radius,
        selection.rules(&document.config),
    ))
}
