//! Placed units.

use serde::{Deserialize, Deserializer, Serialize};

use super::class_data::PartialStats;
use super::lenient;

/// Which side a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Controlled by the player.
    #[default]
    Player,
    /// Opposing force.
    Enemy,
    /// Anything else the editor stored. Never matched by side filters.
    Other,
}

impl Side {
    /// Parse an editor side tag. Unknown tags are [`Side::Other`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "player" => Self::Player,
            "enemy" => Self::Enemy,
            _ => Self::Other,
        }
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = lenient::text(deserializer)?;
        Ok(tag.as_deref().map_or(Self::Other, Self::from_tag))
    }
}

/// Grid position in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    #[serde(default, deserialize_with = "lenient::integer_or_default")]
    pub x: i32,
    /// Row.
    #[serde(default, deserialize_with = "lenient::integer_or_default")]
    pub y: i32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance in tiles. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// A concrete unit placed in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitData {
    /// Unique unit identifier.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Class id; must resolve for the unit to take part in combat.
    #[serde(default)]
    pub class_id: String,

    /// Equipped weapon id.
    #[serde(default)]
    pub weapon_id: String,

    /// Allegiance.
    #[serde(default)]
    pub side: Side,

    /// Level. Carried for the editor, unused by combat.
    #[serde(default = "default_level", deserialize_with = "lenient_level")]
    pub level: u32,

    /// Tile position on its stage.
    #[serde(default)]
    pub position: Position,

    /// Per-unit stats that replace the class base stats field by field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_override: Option<PartialStats>,
}

const fn default_level() -> u32 {
    1
}

fn lenient_level<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::integer_or(deserializer, default_level())
}

impl UnitData {
    /// Check if the unit is on the player's side.
    #[must_use]
    pub fn is_player(&self) -> bool {
        self.side == Side::Player
    }

    /// Check if the unit is on the enemy side.
    #[must_use]
    pub fn is_enemy(&self) -> bool {
        self.side == Side::Enemy
    }
}
