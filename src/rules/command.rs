//! Player commands, the events they produce, and the turn log.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Insertion;
use crate::core::{Coord, Direction, Orientation, PlayerId};
use crate::tiles::{EffectKind, FloorKind, TileId};

/// One player decision submitted to the turn engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Draw from the supply.
    Draw,
    /// Rotate the pending floor tile by `delta` (+1 or -1).
    Rotate { delta: i8 },
    /// Insert the pending floor tile.
    Insert(Insertion),
    /// Arm an effect tile.
    ChooseEffect(EffectKind),
    /// Target cell for an armed fire or ice tile.
    TargetCell(Coord),
    /// Send `player` back `steps` positions with an armed backtrack tile.
    Backtrack { player: PlayerId, steps: u8 },
    /// Step one cell.
    Move(Direction),
    /// Play no effect this turn.
    Skip,
    /// Ask the host to redraw. Changes nothing.
    Redraw,
}

impl Command {
    /// Short name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Command::Draw => "draw",
            Command::Rotate { .. } => "rotate",
            Command::Insert(_) => "insert",
            Command::ChooseEffect(_) => "choose effect",
            Command::TargetCell(_) => "target cell",
            Command::Backtrack { .. } => "backtrack",
            Command::Move(_) => "move",
            Command::Skip => "skip",
            Command::Redraw => "redraw",
        }
    }
}

/// Something that happened while applying a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    DrewFloor { tile: TileId, kind: FloorKind },
    /// Credited as half a tile until the turn ends.
    DrewEffect(EffectKind),
    /// No line was insertable; the tile went back to the supply.
    PlacementSkipped { tile: TileId },
    Rotated { orientation: Orientation },
    Inserted { insertion: Insertion, ejected: TileId },
    EffectArmed(EffectKind),
    FireSet(Coord),
    IceSet(Coord),
    Backtracked { player: PlayerId, to: Coord },
    /// `extra` marks the step granted by a double move tile.
    Moved { player: PlayerId, to: Coord, extra: bool },
    NoAvailableMove { player: PlayerId },
    TurnEnded { next: PlayerId },
    Won(PlayerId),
}

/// Events from one command. Most commands produce one to three.
pub type TurnEvents = SmallVec<[TurnEvent; 4]>;

/// A logged command with the player and clock it ran under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub command: Command,
    /// Clock value when the command was applied.
    pub clock: u64,
}

impl TurnRecord {
    #[must_use]
    pub fn new(player: PlayerId, command: Command, clock: u64) -> Self {
        Self {
            player,
            command,
            clock,
        }
    }
}
