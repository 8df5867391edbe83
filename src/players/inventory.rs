//! Effect tile inventory.
//!
//! A tile drawn this turn counts as half a tile: it shows up in the total
//! but cannot be played until the owner's turn ends, when every half is
//! rounded up to a whole tile. Counts are stored in half-units so the
//! arithmetic stays exact.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::GameError;
use crate::tiles::EffectKind;

/// Per-kind effect tile counts held by one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectInventory {
    halves: FxHashMap<EffectKind, u32>,
}

impl EffectInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn halves(&self, kind: EffectKind) -> u32 {
        self.halves.get(&kind).copied().unwrap_or(0)
    }

    /// Credit a freshly drawn tile (half a unit until the turn ends).
    pub fn credit_draw(&mut self, kind: EffectKind) {
        *self.halves.entry(kind).or_insert(0) += 1;
    }

    /// Credit whole, immediately playable tiles.
    pub fn grant(&mut self, kind: EffectKind, count: u32) {
        *self.halves.entry(kind).or_insert(0) += 2 * count;
    }

    /// Tiles playable right now (rounded down).
    #[must_use]
    pub fn available(&self, kind: EffectKind) -> u32 {
        self.halves(kind) / 2
    }

    /// Tiles held including ones drawn this turn (rounded up).
    #[must_use]
    pub fn total(&self, kind: EffectKind) -> u32 {
        self.halves(kind).div_ceil(2)
    }

    /// Exact fractional count, for display.
    #[must_use]
    pub fn amount(&self, kind: EffectKind) -> f32 {
        self.halves(kind) as f32 / 2.0
    }

    /// Sum of [`EffectInventory::total`] over every kind.
    #[must_use]
    pub fn total_tiles(&self) -> u32 {
        EffectKind::ALL.iter().map(|&kind| self.total(kind)).sum()
    }

    /// Spend exactly one whole tile.
    pub fn consume(&mut self, kind: EffectKind) -> Result<(), GameError> {
        if self.available(kind) == 0 {
            return Err(GameError::NoEffectAvailable(kind));
        }
        if let Some(halves) = self.halves.get_mut(&kind) {
            *halves -= 2;
        }
        Ok(())
    }

    /// End-of-turn rounding: any half tile becomes a whole one.
    pub fn settle(&mut self) {
        for halves in self.halves.values_mut() {
            *halves += *halves % 2;
        }
    }
}
