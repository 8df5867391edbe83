//! Per-player turn state.

use serde::{Deserialize, Serialize};

use crate::core::{Clock, Coord, PlayerId};
use crate::tiles::{FloorTile, TileId};

use super::inventory::EffectInventory;

/// Number of recorded positions, current one included.
pub const HISTORY_LEN: usize = 3;

/// The last three occupied cells, newest first. Index 0 is always the
/// cell the player stands on now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionHistory([Coord; HISTORY_LEN]);

impl PositionHistory {
    /// A history where every slot holds `start`.
    #[must_use]
    pub const fn seeded(start: Coord) -> Self {
        Self([start; HISTORY_LEN])
    }

    /// Record a new position, dropping the oldest.
    pub fn push(&mut self, coord: Coord) {
        self.0.rotate_right(1);
        self.0[0] = coord;
    }

    /// Overwrite the newest slot without shifting the older ones.
    pub fn set_current(&mut self, coord: Coord) {
        self.0[0] = coord;
    }

    /// Position `steps_back` moves ago (0 = newest).
    #[must_use]
    pub fn get(&self, steps_back: usize) -> Option<Coord> {
        self.0.get(steps_back).copied()
    }

    #[must_use]
    pub fn as_array(&self) -> [Coord; HISTORY_LEN] {
        self.0
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    /// Opaque external profile reference.
    profile: Option<u32>,
    history: PositionHistory,
    backtrack_used: bool,
    effects: EffectInventory,
    standing_on: Option<TileId>,
}

impl Player {
    /// Create a player whose history starts at `start`.
    ///
    /// The player is not on the board until [`Player::set_standing_on`] runs.
    #[must_use]
    pub fn new(id: PlayerId, profile: Option<u32>, start: Coord) -> Self {
        Self {
            id,
            profile,
            history: PositionHistory::seeded(start),
            backtrack_used: false,
            effects: EffectInventory::new(),
            standing_on: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn profile(&self) -> Option<u32> {
        self.profile
    }

    #[must_use]
    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    #[must_use]
    pub fn backtrack_used(&self) -> bool {
        self.backtrack_used
    }

    pub(crate) fn mark_backtracked(&mut self) {
        self.backtrack_used = true;
    }

    #[must_use]
    pub fn effects(&self) -> &EffectInventory {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectInventory {
        &mut self.effects
    }

    /// Tile this player stands on.
    #[must_use]
    pub fn standing_on(&self) -> Option<TileId> {
        self.standing_on
    }

    /// Move occupancy from `previous` to `next`.
    ///
    /// This is the only writer of the tile ↔ player link: it clears
    /// `previous`'s occupant, sets `next`'s occupant to this player, and
    /// points this player at `next`.
    pub fn set_standing_on(&mut self, previous: Option<&mut FloorTile>, next: &mut FloorTile) {
        if let Some(previous) = previous {
            if previous.occupant() == Some(self.id) {
                previous.unlink_occupant();
            }
        }
        next.link_occupant(self.id);
        self.standing_on = Some(next.id());
    }

    /// Record a completed step.
    pub fn add_to_past_positions(&mut self, coord: Coord) {
        self.history.push(coord);
    }

    /// Follow the tile under this player after an insertion carried it
    /// to `coord`. Not a step: older positions stay as they were.
    pub fn set_current_position(&mut self, coord: Coord) {
        self.history.set_current(coord);
    }

    /// How many steps back this player may be sent (0, 1 or 2).
    ///
    /// Zero once backtracked this game. Otherwise the position one step
    /// back must be walkable for 1, and two steps back as well for 2.
    /// `can_move_to` resolves a past coordinate against the current board.
    #[must_use]
    pub fn can_be_backtracked(&self, clock: &Clock, can_move_to: impl Fn(Coord, &Clock) -> bool) -> u8 {
        if self.backtrack_used {
            return 0;
        }
        let one_back = self.history.get(1).is_some_and(|c| can_move_to(c, clock));
        if !one_back {
            return 0;
        }
        let two_back = self.history.get(2).is_some_and(|c| can_move_to(c, clock));
        if two_back {
            2
        } else {
            1
        }
    }
}
