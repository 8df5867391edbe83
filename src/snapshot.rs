//! Flat, self-contained game records for save and resume.
//!
//! A [`GameSnapshot`] holds everything needed to continue a game from the
//! exact phase it was taken in. The random source is not part of it: the
//! caller supplies one on restore.
//!
//! ```
//! use maze_shift::core::GameRng;
//! use maze_shift::level::{GameBuilder, LevelDefinition};
//! use maze_shift::snapshot::GameSnapshot;
//!
//! let level = LevelDefinition::parse("2 2 0 0 0 1 1 0 1 1 0 5 0 0 0 0 0 0 0").unwrap();
//! let engine = GameBuilder::new(level).build().unwrap();
//!
//! let bytes = GameSnapshot::capture(&engine).to_bytes().unwrap();
//! let resumed = GameSnapshot::from_bytes(&bytes).unwrap().restore(GameRng::new(1)).unwrap();
//! assert_eq!(resumed.cells(), engine.cells());
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::core::{Clock, GameError, GameState, PlayerId, PlayerMap, RandomSource, RulesConfig};
use crate::players::Player;
use crate::rules::{TurnEngine, TurnPhase};
use crate::supply::TileSupply;
use crate::tiles::Tile;

/// Complete game record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub clock: Clock,
    pub active: PlayerId,
    /// Current phase, including any pending floor tile.
    pub phase: TurnPhase,
    pub board: Board,
    pub players: PlayerMap<Player>,
    pub supply: TileSupply,
    pub config: RulesConfig,
}

impl GameSnapshot {
    /// Record the engine's current state.
    #[must_use]
    pub fn capture<R: RandomSource>(engine: &TurnEngine<R>) -> Self {
        let state = engine.state();
        Self {
            clock: *state.clock(),
            active: engine.active_player(),
            phase: engine.phase().clone(),
            board: state.board().clone(),
            players: state.players().clone(),
            supply: state.supply().clone(),
            config: state.config().clone(),
        }
    }

    /// Rebuild an engine from this record.
    ///
    /// Fails with [`GameError::InvalidSnapshot`] if players and tiles do
    /// not point at each other or a tile appears twice.
    pub fn restore<R: RandomSource>(self, rng: R) -> Result<TurnEngine<R>, GameError> {
        let mut seen = FxHashSet::default();
        let floor_ids = self
            .board
            .iter()
            .map(|(_, tile)| tile.id())
            .chain(self.supply.iter().filter_map(|tile| match tile {
                Tile::Floor(floor) => Some(floor.id()),
                Tile::Effect(_) => None,
            }))
            .chain(self.phase.pending_tile().map(|tile| tile.id()));
        for id in floor_ids {
            if !seen.insert(id) {
                return Err(GameError::InvalidSnapshot(format!("{id} appears twice")));
            }
        }
        if let Some(tile) = self.phase.pending_tile() {
            if tile.occupant().is_some() {
                return Err(GameError::InvalidSnapshot(format!(
                    "pending {} has an occupant",
                    tile.id()
                )));
            }
        }

        let state = GameState::from_parts(self.board, self.players, self.supply, self.clock, self.config)?;
        TurnEngine::resume(state, self.phase, self.active, rng)
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        let bytes = bincode::serialize(self)?;
        debug!(bytes = bytes.len(), "snapshot encoded");
        Ok(bytes)
    }

    /// Decode a bincode record from [`GameSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
