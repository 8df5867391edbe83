//! The undrawn tile pool.
//!
//! The `TileSupply` is an unordered multiset: draws pick uniformly among
//! what is left, and returned floor tiles come back with their fire and
//! ice timers cleared.
//!
//! ## Usage
//!
//! ```
//! use maze_shift::core::{GameRng, Orientation};
//! use maze_shift::supply::TileSupply;
//! use maze_shift::tiles::{EffectKind, EffectTile, FloorKind, FloorTile, TileId};
//!
//! let mut supply = TileSupply::new();
//! supply.return_tile(FloorTile::new(TileId(0), FloorKind::Corner, Orientation::default()).into());
//! supply.return_tile(EffectTile::new(EffectKind::Ice).into());
//!
//! let mut rng = GameRng::new(7);
//! let tile = supply.draw(&mut rng).unwrap();
//! assert_eq!(supply.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{GameError, RandomSource};
use crate::tiles::{EffectKind, FloorKind, Tile};

/// Undrawn tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSupply {
    tiles: Vec<Tile>,
}

impl TileSupply {
    /// Create an empty supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a supply holding exactly `tiles`, as given.
    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Remove and return one tile, uniformly at random.
    ///
    /// An empty supply means the level data was wrong; the caller should
    /// treat the error as fatal for the game.
    pub fn draw(&mut self, rng: &mut impl RandomSource) -> Result<Tile, GameError> {
        if self.tiles.is_empty() {
            return Err(GameError::SupplyExhausted);
        }
        let index = rng.pick_index(self.tiles.len());
        Ok(self.tiles.swap_remove(index))
    }

    /// Put a tile back. Floor tiles lose their fire and ice timers.
    pub fn return_tile(&mut self, mut tile: Tile) {
        if let Tile::Floor(floor) = &mut tile {
            floor.clear_effects();
        }
        self.tiles.push(tile);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Number of undrawn floor tiles of `kind`.
    #[must_use]
    pub fn floor_count(&self, kind: FloorKind) -> usize {
        self.tiles
            .iter()
            .filter(|tile| matches!(tile, Tile::Floor(floor) if floor.kind() == kind))
            .count()
    }

    /// Number of undrawn effect tiles of `kind`.
    #[must_use]
    pub fn effect_count(&self, kind: EffectKind) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.effect_kind() == Some(kind))
            .count()
    }
}
