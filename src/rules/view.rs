//! Read-only views for a rendering host.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, GameError, GameState, Orientation, PlayerId};
use crate::tiles::{EffectKind, FloorKind};

/// Render-relevant state of one cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub coord: Coord,
    pub kind: FloorKind,
    pub orientation: Orientation,
    pub fixed: bool,
    pub on_fire: bool,
    pub frozen: bool,
    pub occupant: Option<PlayerId>,
}

/// Effect tile count shown as `available/total`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectCount {
    pub kind: EffectKind,
    /// Playable now.
    pub available: u32,
    /// Including tiles drawn this turn.
    pub total: u32,
}

/// Render-relevant state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub profile: Option<u32>,
    pub position: Coord,
    pub effects: [EffectCount; 4],
    pub total_effect_tiles: u32,
    pub backtrack_used: bool,
}

/// A legal backtrack target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktrackOption {
    pub player: PlayerId,
    pub steps: u8,
    pub destination: Coord,
}

pub(crate) fn cell_views(state: &GameState) -> Vec<CellView> {
    let clock = state.clock();
    state
        .board()
        .iter()
        .map(|(coord, tile)| CellView {
            coord,
            kind: tile.kind(),
            orientation: tile.orientation(),
            fixed: tile.is_fixed(),
            on_fire: tile.is_on_fire(clock),
            frozen: tile.is_frozen(clock),
            occupant: tile.occupant(),
        })
        .collect()
}

pub(crate) fn player_views(state: &GameState) -> Result<Vec<PlayerView>, GameError> {
    state
        .players()
        .iter()
        .map(|(id, player)| {
            let inventory = player.effects();
            Ok(PlayerView {
                id,
                profile: player.profile(),
                position: state.player_position(id)?,
                effects: EffectKind::ALL.map(|kind| EffectCount {
                    kind,
                    available: inventory.available(kind),
                    total: inventory.total(kind),
                }),
                total_effect_tiles: inventory.total_tiles(),
                backtrack_used: player.backtrack_used(),
            })
        })
        .collect()
}

/// Every (player, distance) pair a backtrack tile could be used on now.
pub(crate) fn backtrack_options(state: &GameState) -> Result<Vec<BacktrackOption>, GameError> {
    let mut options = Vec::new();
    for (id, player) in state.players().iter() {
        let reach = state.can_be_backtracked(id)?;
        for steps in 1..=reach {
            if let Some(destination) = player.history().get(usize::from(steps)) {
                options.push(BacktrackOption {
                    player: id,
                    steps,
                    destination,
                });
            }
        }
    }
    Ok(options)
}
