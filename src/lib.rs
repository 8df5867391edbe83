//! # maze-shift
//!
//! Rules engine for a tile-sliding maze board game.
//!
//! Players take turns drawing a tile, shoving floor tiles into the board
//! to reshape its corridors, optionally playing an effect tile (fire, ice,
//! double move, backtrack), then stepping along open connections. The
//! first player to step onto a goal tile wins.
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: the clock, round length and every timer live in
//!    one `GameState`; nothing is global.
//!
//! 2. **Commands in, events out**: the host submits `Command`s to the
//!    `TurnEngine` and re-renders from the returned `TurnEvent`s and the
//!    query views. The engine never calls back into the host.
//!
//! 3. **All or nothing**: a rejected command leaves the game untouched.
//!
//! ## Modules
//!
//! - `core`: players, geometry, clock, RNG, configuration, errors, state
//! - `tiles`: floor and effect tiles
//! - `board`: the grid, connectivity and insertion
//! - `supply`: the tile bag
//! - `players`: per-player history, inventory and occupancy
//! - `rules`: the turn engine and its views
//! - `level`: level definitions and game setup
//! - `snapshot`: save and resume

pub mod board;
pub mod core;
pub mod level;
pub mod players;
pub mod rules;
pub mod snapshot;
pub mod supply;
pub mod tiles;

// Re-export commonly used types
pub use crate::core::{
    Clock, Coord, Direction, DirectionMask, ErrorClass, GameError, GameRng, GameState, Orientation, PlayerId,
    PlayerMap, RandomSource, RulesConfig,
};

pub use crate::board::{Board, InsertableLines, Insertion};

pub use crate::tiles::{EffectKind, EffectTile, FloorKind, FloorTile, Tile, TileId};

pub use crate::players::{EffectInventory, Player};

pub use crate::supply::TileSupply;

pub use crate::rules::{
    BacktrackOption, CellView, Command, GameResult, PhaseKind, PlayerView, TurnEngine, TurnEvent, TurnEvents,
    TurnPhase,
};

pub use crate::level::{GameBuilder, LevelDefinition};

pub use crate::snapshot::GameSnapshot;
