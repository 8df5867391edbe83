//! Turn rules.
//!
//! The `TurnEngine` walks the active player through
//! DRAWING → PLACEMENT → PLAYACTION → MOVEMENT, one command at a time,
//! and stops in END once someone reaches the goal.
//!
//! ## Key Types
//!
//! - `TurnEngine`: phase state machine over a `GameState`
//! - `TurnPhase` / `PhaseKind`: where the active player is in their turn
//! - `Command`: one player decision
//! - `TurnEvent`: what a command did
//! - `TurnRecord`: logged command
//! - `GameResult`: the winner
//! - `CellView`, `PlayerView`, `BacktrackOption`: read-only render data

pub mod command;
pub mod engine;
pub mod phase;
pub mod view;

pub use command::{Command, TurnEvent, TurnEvents, TurnRecord};
pub use engine::{GameResult, TurnEngine};
pub use phase::{PhaseKind, TurnPhase};
pub use view::{BacktrackOption, CellView, EffectCount, PlayerView};
