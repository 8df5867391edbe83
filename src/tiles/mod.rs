//! Tiles: everything that lives on the board or in the supply.
//!
//! ## Key Types
//!
//! - `FloorTile`: walkable cell with shape, orientation and timers
//! - `EffectTile`: one-shot fire / ice / double move / backtrack token
//! - `Tile`: either of the two, as held by the supply

pub mod effect;
pub mod floor;

pub use effect::{EffectKind, EffectTile};
pub use floor::{FloorKind, FloorTile, TileId};

use serde::{Deserialize, Serialize};

/// Anything that can be drawn from the supply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor(FloorTile),
    Effect(EffectTile),
}

impl Tile {
    #[must_use]
    pub fn is_floor(&self) -> bool {
        matches!(self, Tile::Floor(_))
    }

    /// The floor tile inside, if this is one.
    #[must_use]
    pub fn into_floor(self) -> Option<FloorTile> {
        match self {
            Tile::Floor(tile) => Some(tile),
            Tile::Effect(_) => None,
        }
    }

    /// The effect kind, if this is an effect tile.
    #[must_use]
    pub fn effect_kind(&self) -> Option<EffectKind> {
        match self {
            Tile::Floor(_) => None,
            Tile::Effect(effect) => Some(effect.kind()),
        }
    }
}

impl From<FloorTile> for Tile {
    fn from(tile: FloorTile) -> Self {
        Tile::Floor(tile)
    }
}

impl From<EffectTile> for Tile {
    fn from(tile: EffectTile) -> Self {
        Tile::Effect(tile)
    }
}
