//! The tile supply ("bag") players draw from.

pub mod bag;

pub use bag::TileSupply;
