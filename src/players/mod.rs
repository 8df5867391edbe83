//! Players: seat identity, recent path, effect inventory and occupancy.

pub mod inventory;
pub mod player;

pub use inventory::EffectInventory;
pub use player::{Player, PositionHistory, HISTORY_LEN};
