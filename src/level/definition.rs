//! Level data: board size, fixed tiles, start cells and tile counts.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Coord, GameError, Orientation, MAX_PLAYERS};
use crate::tiles::{EffectKind, FloorKind};

/// A tile pinned to the board for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedTileSpec {
    pub coord: Coord,
    pub kind: FloorKind,
    /// Quarter turns, `0..=3`.
    pub orientation: u8,
}

/// How many loose floor tiles of each kind the supply starts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorCounts {
    pub straight: u32,
    pub tshape: u32,
    pub corner: u32,
    pub goal: u32,
}

impl FloorCounts {
    #[must_use]
    pub fn get(&self, kind: FloorKind) -> u32 {
        match kind {
            FloorKind::Straight => self.straight,
            FloorKind::TShape => self.tshape,
            FloorKind::Corner => self.corner,
            FloorKind::Goal => self.goal,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        FloorKind::ALL.iter().map(|&kind| self.get(kind)).sum()
    }
}

/// How many effect tiles of each kind the supply starts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectCounts {
    pub ice: u32,
    pub fire: u32,
    pub double_move: u32,
    pub backtrack: u32,
}

impl EffectCounts {
    #[must_use]
    pub fn get(&self, kind: EffectKind) -> u32 {
        match kind {
            EffectKind::Ice => self.ice,
            EffectKind::Fire => self.fire,
            EffectKind::DoubleMove => self.double_move,
            EffectKind::Backtrack => self.backtrack,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        EffectKind::ALL.iter().map(|&kind| self.get(kind)).sum()
    }
}

/// Everything needed to set up a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub width: usize,
    pub height: usize,
    pub fixed_tiles: Vec<FixedTileSpec>,
    /// Start cell per seat, seat 0 first.
    pub starts: Vec<Coord>,
    pub floor_counts: FloorCounts,
    pub effect_counts: EffectCounts,
}

impl LevelDefinition {
    /// Cells not covered by a fixed tile.
    #[must_use]
    pub fn open_cells(&self) -> usize {
        (self.width * self.height).saturating_sub(self.fixed_tiles.len())
    }

    /// Check that a game can be set up from this level.
    ///
    /// Besides bounds and overlap checks, the loose floor tiles must
    /// outnumber the open cells, so the supply never runs dry of floor
    /// tiles to insert.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        let mut fixed = FxHashSet::default();
        for fixed_tile in &self.fixed_tiles {
            if !fixed_tile.coord.in_bounds(self.width, self.height) {
                return Err(invalid(format!("fixed tile at {} is off the board", fixed_tile.coord)));
            }
            if Orientation::new(fixed_tile.orientation).is_none() {
                return Err(invalid(format!(
                    "fixed tile at {} has orientation {}, expected 0..=3",
                    fixed_tile.coord, fixed_tile.orientation
                )));
            }
            if !fixed.insert(fixed_tile.coord) {
                return Err(invalid(format!("two fixed tiles at {}", fixed_tile.coord)));
            }
        }

        if self.starts.is_empty() || self.starts.len() > MAX_PLAYERS {
            return Err(invalid(format!(
                "need 1 to {MAX_PLAYERS} start cells, got {}",
                self.starts.len()
            )));
        }
        let mut starts = FxHashSet::default();
        for &start in &self.starts {
            if !start.in_bounds(self.width, self.height) {
                return Err(invalid(format!("start cell {start} is off the board")));
            }
            if !starts.insert(start) {
                return Err(invalid(format!("start cell {start} is shared")));
            }
        }

        let floor = self.floor_counts.total() as usize;
        if floor <= self.open_cells() {
            return Err(invalid(format!(
                "{floor} loose floor tiles cannot fill {} open cells and leave a reserve",
                self.open_cells()
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> GameError {
    GameError::InvalidLevel(message)
}
