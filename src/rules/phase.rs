//! Turn phases.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::tiles::{EffectKind, FloorTile};

/// Where the active player is within their turn.
///
/// ```text
/// Drawing ─┬─ floor tile ──▶ Placement ──▶ PlayAction ──▶ Movement ──▶ Drawing (next player)
///          └─ effect tile ─────────────────▶ PlayAction        │
///                                                               └──▶ End (goal reached)
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the active player to draw.
    Drawing,
    /// A drawn floor tile waits to be rotated and inserted.
    Placement { tile: FloorTile },
    /// The player may play one effect tile or skip. `armed` is the effect
    /// chosen but not yet resolved.
    PlayAction { armed: Option<EffectKind> },
    /// Waiting for the regular step.
    Movement,
    /// Terminal: `winner` reached the goal.
    End { winner: PlayerId },
}

impl TurnPhase {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            TurnPhase::Drawing => PhaseKind::Drawing,
            TurnPhase::Placement { .. } => PhaseKind::Placement,
            TurnPhase::PlayAction { .. } => PhaseKind::PlayAction,
            TurnPhase::Movement => PhaseKind::Movement,
            TurnPhase::End { .. } => PhaseKind::End,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::End { .. })
    }

    /// The floor tile waiting to be placed, if any.
    #[must_use]
    pub fn pending_tile(&self) -> Option<&FloorTile> {
        match self {
            TurnPhase::Placement { tile } => Some(tile),
            _ => None,
        }
    }
}

/// Fieldless mirror of [`TurnPhase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Drawing,
    Placement,
    PlayAction,
    Movement,
    End,
}
