//! Error type shared by every rules operation.
//!
//! Errors fall into three classes (see [`ErrorClass`]). "No legal move"
//! and "no insertable line" are not errors at all: they are ordinary
//! branches of the turn and surface as [`crate::rules::TurnEvent`]s.
//!
//! A command that fails never leaves partial changes behind.

use thiserror::Error;

use super::geometry::{Coord, Direction};
use super::player::PlayerId;
use crate::rules::PhaseKind;
use crate::tiles::EffectKind;

/// How the caller should react to a [`GameError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Malformed input: fix the arguments and resubmit.
    Argument,
    /// Well-formed but illegal right now: pick another action.
    RuleViolation,
    /// Corrupt level or game data. Fatal for the current game.
    DataIntegrity,
}

/// Errors raised by board, supply and turn operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("coordinate {coord} is outside the {width}x{height} board")]
    CoordOutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },
    #[error("insertion direction {0} is not in 0..=3")]
    InvalidDirection(u8),
    #[error("line {line} is out of bounds (limit {limit})")]
    LineOutOfBounds { line: usize, limit: usize },
    #[error("rotation must be +1 or -1, got {0}")]
    InvalidRotation(i8),
    #[error("backtrack distance must be 1 or 2, got {0}")]
    InvalidBacktrackSteps(u8),
    #[error("no seat for {0}")]
    UnknownPlayer(PlayerId),

    #[error("{command} is not allowed during the {phase:?} phase")]
    WrongPhase {
        command: &'static str,
        phase: PhaseKind,
    },
    #[error("that line holds a fixed or frozen tile")]
    LineNotInsertable,
    #[error("no usable {0} tile")]
    NoEffectAvailable(EffectKind),
    #[error("fire cannot be placed on or next to a player at {0}")]
    FireNearPlayer(Coord),
    #[error("choose an effect tile first")]
    NoEffectChosen,
    #[error("{0} does not take a target cell")]
    EffectNeedsNoTarget(EffectKind),
    #[error("{0} cannot be backtracked that far")]
    BacktrackIneligible(PlayerId),
    #[error("cannot move {0}")]
    MoveNotAllowed(Direction),
    #[error("cell {0} is already occupied")]
    CellOccupied(Coord),
    #[error("the game is over")]
    GameOver,

    #[error("the tile supply is empty")]
    SupplyExhausted,
    #[error("invalid level: {0}")]
    InvalidLevel(String),
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("invalid rules config: {0}")]
    InvalidConfig(String),
    #[error("snapshot encoding failed: {0}")]
    Codec(String),
}

impl GameError {
    /// Classify this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            GameError::CoordOutOfBounds { .. }
            | GameError::InvalidDirection(_)
            | GameError::LineOutOfBounds { .. }
            | GameError::InvalidRotation(_)
            | GameError::InvalidBacktrackSteps(_)
            | GameError::UnknownPlayer(_) => ErrorClass::Argument,

            GameError::WrongPhase { .. }
            | GameError::LineNotInsertable
            | GameError::NoEffectAvailable(_)
            | GameError::FireNearPlayer(_)
            | GameError::NoEffectChosen
            | GameError::EffectNeedsNoTarget(_)
            | GameError::BacktrackIneligible(_)
            | GameError::MoveNotAllowed(_)
            | GameError::CellOccupied(_)
            | GameError::GameOver => ErrorClass::RuleViolation,

            GameError::SupplyExhausted
            | GameError::InvalidLevel(_)
            | GameError::InvalidSnapshot(_)
            | GameError::InvalidConfig(_)
            | GameError::Codec(_) => ErrorClass::DataIntegrity,
        }
    }

    /// Whether the game can continue after this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::DataIntegrity
    }
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Codec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert_eq!(GameError::InvalidDirection(7).class(), ErrorClass::Argument);
        assert_eq!(
            GameError::FireNearPlayer(Coord::new(1, 1)).class(),
            ErrorClass::RuleViolation
        );
        assert!(GameError::SupplyExhausted.is_fatal());
        assert!(!GameError::LineNotInsertable.is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = GameError::CoordOutOfBounds {
            coord: Coord::new(9, 0),
            width: 4,
            height: 4,
        };
        assert_eq!(err.to_string(), "coordinate (9, 0) is outside the 4x4 board");
        assert_eq!(
            GameError::InvalidRotation(2).to_string(),
            "rotation must be +1 or -1, got 2"
        );
        assert_eq!(
            GameError::NoEffectAvailable(EffectKind::DoubleMove).to_string(),
            "no usable DOUBLEMOVE tile"
        );
    }
}
