//! The maze board.
//!
//! ## Key Types
//!
//! - `Board`: row-major grid of floor tiles; connectivity, insertion and
//!   area effects
//! - `Insertion`: a push direction plus a line index
//! - `InsertableLines`: per-column and per-row insertability

pub mod grid;
pub mod insertion;

pub use grid::Board;
pub use insertion::{InsertableLines, Insertion};
