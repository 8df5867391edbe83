//! Effect tiles.
//!
//! Effect tiles carry no state of their own; only their kind matters.
//! Once drawn they become a count in the player's inventory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What an effect tile does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectKind {
    /// Sets a 3×3 block on fire, closing it to movement.
    Fire,
    /// Freezes a 3×3 block, pinning its rows and columns.
    Ice,
    /// Grants an extra step before the normal move.
    DoubleMove,
    /// Sends a player back along its recent path.
    Backtrack,
}

impl EffectKind {
    /// All kinds, in level-file count order.
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Ice,
        EffectKind::Fire,
        EffectKind::DoubleMove,
        EffectKind::Backtrack,
    ];

    /// Whether playing this effect needs a target cell.
    #[must_use]
    pub const fn takes_cell_target(self) -> bool {
        matches!(self, EffectKind::Fire | EffectKind::Ice)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::Fire => "FIRE",
            EffectKind::Ice => "ICE",
            EffectKind::DoubleMove => "DOUBLEMOVE",
            EffectKind::Backtrack => "BACKTRACK",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An undrawn effect tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectTile {
    kind: EffectKind,
}

impl EffectTile {
    #[must_use]
    pub const fn new(kind: EffectKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub const fn kind(self) -> EffectKind {
        self.kind
    }
}
