//! Stage (map) definitions.

use serde::{Deserialize, Serialize};

use super::lenient;

/// A map with a terrain grid and the units placed on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageData {
    /// Unique stage identifier.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Grid width in tiles.
    #[serde(default, deserialize_with = "lenient::integer_or_default")]
    pub width: u32,

    /// Grid height in tiles.
    #[serde(default, deserialize_with = "lenient::integer_or_default")]
    pub height: u32,

    /// Row-major terrain ids, `width * height` entries.
    #[serde(default)]
    pub terrain_grid: Vec<String>,

    /// Ids of the units present on this stage.
    #[serde(default)]
    pub units: Vec<String>,
}

impl StageData {
    /// Check that the grid holds exactly `width * height` cells.
    #[must_use]
    pub fn has_consistent_grid(&self) -> bool {
        self.terrain_grid.len() as u64 == u64::from(self.width) * u64::from(self.height)
    }

    /// Terrain id at a tile, `None` off-grid or when the grid is malformed.
    #[must_use]
    pub fn terrain_at(&self, x: i32, y: i32) -> Option<&str> {
        if !self.has_consistent_grid() {
            return None;
        }
        let x = u32::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = u32::try_from(y).ok().filter(|y| *y < self.height)?;
        let index = usize::try_from(u64::from(y) * u64::from(self.width) + u64::from(x)).ok()?;
        self.terrain_grid.get(index).map(String::as_str)
    }
}
