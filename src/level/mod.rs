//! Levels: definitions, the text format, and game setup.
//!
//! ## Key Types
//!
//! - `LevelDefinition`: board size, fixed tiles, start cells, tile counts
//! - `GameBuilder`: turns a level into a ready `TurnEngine`

pub mod definition;
pub mod parser;
pub mod setup;

pub use definition::{EffectCounts, FixedTileSpec, FloorCounts, LevelDefinition};
pub use parser::LEVEL_FILE_STARTS;
pub use setup::GameBuilder;
