//! Floor tiles: the walkable cells of the maze.
//!
//! A floor tile has a shape ([`FloorKind`]), an orientation, and two
//! timers. Fire closes every edge while it burns; ice pins the tile (and
//! with it, its row and column) in place while it holds. Neither timer is
//! stored as "turns left": both record the clock tick at which they expire,
//! so they need no per-turn bookkeeping.
//!
//! ## Occupancy
//!
//! A tile knows which player stands on it and the player knows which tile
//! it stands on. Only [`crate::players::Player::set_standing_on`] writes
//! either side of that link.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{Clock, DirectionMask, GameError, Orientation, PlayerId};

/// Stable identity of a floor tile, kept while it moves around the board
/// and through the supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Shape of a floor tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorKind {
    /// Open north and south.
    Straight,
    /// Open north and east.
    Corner,
    /// Open east, south and west.
    TShape,
    /// Open on every side. Reaching it wins.
    Goal,
}

impl FloorKind {
    /// All kinds, in level-file count order.
    pub const ALL: [FloorKind; 4] = [
        FloorKind::Straight,
        FloorKind::TShape,
        FloorKind::Corner,
        FloorKind::Goal,
    ];

    /// Connectivity at orientation 0.
    #[must_use]
    pub const fn base_mask(self) -> DirectionMask {
        match self {
            FloorKind::Straight => DirectionMask::new([true, false, true, false]),
            FloorKind::Corner => DirectionMask::new([true, true, false, false]),
            FloorKind::TShape => DirectionMask::new([false, true, true, true]),
            FloorKind::Goal => DirectionMask::new([true, true, true, true]),
        }
    }

    /// Name used in level files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            FloorKind::Straight => "STRAIGHT",
            FloorKind::Corner => "CORNER",
            FloorKind::TShape => "TSHAPE",
            FloorKind::Goal => "GOAL",
        }
    }
}

impl FromStr for FloorKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FloorKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GameError::InvalidLevel(format!("unknown floor tile kind {s:?}")))
    }
}

/// A walkable board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredFloorTile")]
pub struct FloorTile {
    id: TileId,
    kind: FloorKind,
    orientation: Orientation,
    /// Base mask rotated by `orientation`, cached. Never stored.
    #[serde(skip_serializing)]
    mask: DirectionMask,
    fixed: bool,
    on_fire_until: Option<u64>,
    frozen_until: Option<u64>,
    occupant: Option<PlayerId>,
}

/// Stored form of a [`FloorTile`]; the mask is rebuilt on load.
#[derive(Deserialize)]
struct StoredFloorTile {
    id: TileId,
    kind: FloorKind,
    orientation: Orientation,
    fixed: bool,
    on_fire_until: Option<u64>,
    frozen_until: Option<u64>,
    occupant: Option<PlayerId>,
}

impl From<StoredFloorTile> for FloorTile {
    fn from(stored: StoredFloorTile) -> Self {
        Self {
            fixed: stored.fixed,
            on_fire_until: stored.on_fire_until,
            frozen_until: stored.frozen_until,
            occupant: stored.occupant,
            ..FloorTile::new(stored.id, stored.kind, stored.orientation)
        }
    }
}

impl FloorTile {
    /// Create an unfixed, unoccupied tile with no active effects.
    #[must_use]
    pub fn new(id: TileId, kind: FloorKind, orientation: Orientation) -> Self {
        Self {
            id,
            kind,
            orientation,
            mask: kind.base_mask().rotated(orientation.quarter_turns() as i8),
            fixed: false,
            on_fire_until: None,
            frozen_until: None,
            occupant: None,
        }
    }

    /// Builder form of [`FloorTile::set_fixed`].
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> FloorKind {
        self.kind
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether this tile is permanently fixed (ignores ice).
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Mark this tile as permanently fixed or not.
    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    #[must_use]
    pub fn is_goal(&self) -> bool {
        self.kind == FloorKind::Goal
    }

    /// Player standing here, if any.
    #[must_use]
    pub fn occupant(&self) -> Option<PlayerId> {
        self.occupant
    }

    /// Fire expiry tick, `None` if never set.
    #[must_use]
    pub fn on_fire_until(&self) -> Option<u64> {
        self.on_fire_until
    }

    /// Ice expiry tick, `None` if never set.
    #[must_use]
    pub fn frozen_until(&self) -> Option<u64> {
        self.frozen_until
    }

    /// Rotate a quarter turn: `+1` clockwise, `-1` counter-clockwise.
    pub fn rotate(&mut self, delta: i8) -> Result<(), GameError> {
        if delta != 1 && delta != -1 {
            return Err(GameError::InvalidRotation(delta));
        }
        self.orientation = self.orientation.rotated(delta);
        self.mask = self.mask.rotated(delta);
        Ok(())
    }

    /// Orientation-rotated connectivity, ignoring fire.
    #[must_use]
    pub fn raw_mask(&self) -> DirectionMask {
        self.mask
    }

    /// Connectivity right now: all closed while burning.
    #[must_use]
    pub fn effective_mask(&self, clock: &Clock) -> DirectionMask {
        if self.is_on_fire(clock) {
            DirectionMask::CLOSED
        } else {
            self.mask
        }
    }

    /// Connectivity as seen from a neighbouring tile: also all closed when
    /// someone stands here.
    #[must_use]
    pub fn neighbour_mask(&self, clock: &Clock) -> DirectionMask {
        if self.occupant.is_some() {
            DirectionMask::CLOSED
        } else {
            self.effective_mask(clock)
        }
    }

    /// Whether a player could step onto this tile now.
    #[must_use]
    pub fn can_move_to(&self, clock: &Clock) -> bool {
        !self.is_on_fire(clock) && self.occupant.is_none()
    }

    #[must_use]
    pub fn is_on_fire(&self, clock: &Clock) -> bool {
        clock.is_active(self.on_fire_until)
    }

    #[must_use]
    pub fn is_frozen(&self, clock: &Clock) -> bool {
        clock.is_active(self.frozen_until)
    }

    /// Whether insertion may not push this tile: fixed, or frozen now.
    #[must_use]
    pub fn is_currently_fixed(&self, clock: &Clock) -> bool {
        self.fixed || self.is_frozen(clock)
    }

    /// Burn for `rounds` full rounds from now.
    pub fn set_on_fire(&mut self, clock: &Clock, rounds: u64) {
        self.on_fire_until = Some(clock.rounds_from_now(rounds));
    }

    /// Freeze for `rounds` full rounds from now.
    pub fn freeze(&mut self, clock: &Clock, rounds: u64) {
        self.frozen_until = Some(clock.rounds_from_now(rounds));
    }

    /// Drop both timers.
    pub fn clear_effects(&mut self) {
        self.on_fire_until = None;
        self.frozen_until = None;
    }

    pub(crate) fn link_occupant(&mut self, player: PlayerId) {
        self.occupant = Some(player);
    }

    pub(crate) fn unlink_occupant(&mut self) {
        self.occupant = None;
    }
}
