//! The board grid: connectivity, insertion and area effects.

use serde::{Deserialize, Serialize};
use std::mem;

use crate::core::{Clock, Coord, Direction, DirectionMask, GameError, PlayerMap};
use crate::players::Player;
use crate::tiles::{FloorTile, TileId};

use super::insertion::{InsertableLines, Insertion};

/// A `width` × `height` grid of floor tiles, stored row-major.
///
/// Every cell always holds a tile. Tiles move between cells only through
/// [`Board::insert_floor_tile`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredBoard")]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<FloorTile>,
}

/// Stored form of a [`Board`], checked by [`Board::from_cells`] on load.
#[derive(Deserialize)]
struct StoredBoard {
    width: usize,
    height: usize,
    cells: Vec<FloorTile>,
}

impl TryFrom<StoredBoard> for Board {
    type Error = GameError;

    fn try_from(stored: StoredBoard) -> Result<Self, Self::Error> {
        Board::from_cells(stored.width, stored.height, stored.cells).map_err(|err| match err {
            GameError::InvalidLevel(reason) => GameError::InvalidSnapshot(reason),
            other => other,
        })
    }
}

impl Board {
    /// Build a board from row-major cells.
    pub fn from_cells(width: usize, height: usize, cells: Vec<FloorTile>) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidLevel(format!(
                "board must be at least 1x1, got {width}x{height}"
            )));
        }
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(GameError::InvalidLevel(format!(
                "a {width}x{height} board cannot hold {} cells",
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, coord: Coord) -> Result<usize, GameError> {
        if coord.in_bounds(self.width, self.height) {
            Ok(coord.y * self.width + coord.x)
        } else {
            Err(GameError::CoordOutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    pub fn tile_at(&self, coord: Coord) -> Result<&FloorTile, GameError> {
        let index = self.index(coord)?;
        Ok(&self.cells[index])
    }

    pub fn tile_at_mut(&mut self, coord: Coord) -> Result<&mut FloorTile, GameError> {
        let index = self.index(coord)?;
        Ok(&mut self.cells[index])
    }

    /// Two distinct tiles, mutably.
    ///
    /// Fails with [`GameError::CellOccupied`] if `a == b`, since the same
    /// tile cannot be borrowed twice.
    pub fn tile_pair_mut(
        &mut self,
        a: Coord,
        b: Coord,
    ) -> Result<(&mut FloorTile, &mut FloorTile), GameError> {
        let (ia, ib) = (self.index(a)?, self.index(b)?);
        if ia == ib {
            return Err(GameError::CellOccupied(b));
        }
        if ia < ib {
            let (low, high) = self.cells.split_at_mut(ib);
            Ok((&mut low[ia], &mut high[0]))
        } else {
            let (low, high) = self.cells.split_at_mut(ia);
            Ok((&mut high[0], &mut low[ib]))
        }
    }

    /// Current cell of the tile with `id`.
    #[must_use]
    pub fn position_of(&self, id: TileId) -> Option<Coord> {
        self.cells
            .iter()
            .position(|tile| tile.id() == id)
            .map(|index| self.coord_of(index))
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &FloorTile)> {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, tile)| (self.coord_of(index), tile))
    }

    /// Directions a player standing on `from` may step in right now.
    ///
    /// A direction is open when the source tile's effective mask allows
    /// leaving that way and the neighbour exists and its neighbour view
    /// allows entering from the opposite side.
    pub fn movable_from(&self, from: Coord, clock: &Clock) -> Result<DirectionMask, GameError> {
        let source = self.tile_at(from)?.effective_mask(clock);
        let mut movable = DirectionMask::CLOSED;
        for direction in source.open_directions() {
            let Some(to) = from.step(direction, self.width, self.height) else {
                continue;
            };
            let entry = self.tile_at(to)?.neighbour_mask(clock);
            movable.set(direction, entry.allows(direction.opposite()));
        }
        Ok(movable)
    }

    /// Destination of a single step, if `direction` is open from `from`.
    pub fn step_target(&self, from: Coord, direction: Direction, clock: &Clock) -> Result<Option<Coord>, GameError> {
        if !self.movable_from(from, clock)?.allows(direction) {
            return Ok(None);
        }
        Ok(from.step(direction, self.width, self.height))
    }

    /// Lines that contain no currently fixed tile.
    #[must_use]
    pub fn insertable_lines(&self, clock: &Clock) -> InsertableLines {
        let mut columns = vec![true; self.width];
        let mut rows = vec![true; self.height];
        for (coord, tile) in self.iter() {
            if tile.is_currently_fixed(clock) {
                columns[coord.x] = false;
                rows[coord.y] = false;
            }
        }
        InsertableLines { columns, rows }
    }

    /// Push `tile` into the board and return the tile pushed out.
    ///
    /// A player standing on the tile that falls off is moved onto the new
    /// tile first, so the returned tile never has an occupant. Only the
    /// direction and line are validated here; whether the line is
    /// currently insertable is a rule the caller enforces.
    pub fn insert_floor_tile(
        &mut self,
        mut tile: FloorTile,
        insertion: Insertion,
        players: &mut PlayerMap<Player>,
    ) -> Result<FloorTile, GameError> {
        insertion.validate(self.width, self.height)?;
        let line = insertion.cells(self.width, self.height);
        let exit = line[line.len() - 1];
        let exit_index = self.index(exit)?;

        if let Some(rider) = self.cells[exit_index].occupant() {
            let player = players.get_mut(rider).ok_or(GameError::UnknownPlayer(rider))?;
            player.set_standing_on(Some(&mut self.cells[exit_index]), &mut tile);
        }

        let mut carry = tile;
        for coord in line {
            let index = self.index(coord)?;
            carry = mem::replace(&mut self.cells[index], carry);
        }
        Ok(carry)
    }

    /// Whether fire may be dropped on `center`: no player inside the
    /// clipped square of `radius` around it.
    pub fn can_set_on_fire(&self, center: Coord, radius: usize) -> Result<bool, GameError> {
        self.index(center)?;
        let occupied = center
            .neighbourhood(radius, self.width, self.height)
            .into_iter()
            .any(|coord| self.cells[coord.y * self.width + coord.x].occupant().is_some());
        Ok(!occupied)
    }

    /// Burn every tile within `radius` of `center` for `rounds` rounds.
    pub fn set_on_fire(&mut self, center: Coord, radius: usize, clock: &Clock, rounds: u64) -> Result<(), GameError> {
        self.index(center)?;
        for coord in center.neighbourhood(radius, self.width, self.height) {
            self.tile_at_mut(coord)?.set_on_fire(clock, rounds);
        }
        Ok(())
    }

    /// Freeze every tile within `radius` of `center` for `rounds` rounds.
    pub fn set_freeze_on(&mut self, center: Coord, radius: usize, clock: &Clock, rounds: u64) -> Result<(), GameError> {
        self.index(center)?;
        for coord in center.neighbourhood(radius, self.width, self.height) {
            self.tile_at_mut(coord)?.freeze(clock, rounds);
        }
        Ok(())
    }
}
