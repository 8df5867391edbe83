//! Core engine types: players, geometry, clock, RNG, configuration, errors
//! and the aggregate game state.
//!
//! Everything else in the crate builds on these.

pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod player;
pub mod rng;
pub mod state;

pub use clock::Clock;
pub use config::{RulesConfig, MAX_EFFECT_RADIUS};
pub use error::{ErrorClass, GameError};
pub use geometry::{Coord, Direction, DirectionMask, Orientation};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::{GameRng, RandomSource};
pub use state::GameState;
