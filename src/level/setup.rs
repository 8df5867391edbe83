//! Game setup from a level definition.

use tracing::info;

use crate::board::Board;
use crate::core::{GameError, GameRng, GameState, Orientation, RandomSource, RulesConfig, MAX_PLAYERS};
use crate::rules::TurnEngine;
use crate::supply::TileSupply;
use crate::tiles::{EffectKind, EffectTile, FloorKind, FloorTile, TileId};

use super::definition::LevelDefinition;

/// Builder for a fresh game.
///
/// Setup order:
/// 1. fixed tiles go on the board
/// 2. every loose floor tile goes into the supply, randomly oriented
/// 3. each open cell is filled with a random draw
/// 4. effect tiles join the supply
/// 5. players stand on their start cells
pub struct GameBuilder {
    level: LevelDefinition,
    player_count: usize,
    profiles: Vec<Option<u32>>,
    config: RulesConfig,
}

impl GameBuilder {
    /// One seat per start cell in `level`, default rules.
    pub fn new(level: LevelDefinition) -> Self {
        Self {
            player_count: level.starts.len().clamp(1, MAX_PLAYERS),
            level,
            profiles: Vec::new(),
            config: RulesConfig::default(),
        }
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((1..=MAX_PLAYERS).contains(&count), "Player count must be 1-4");
        self.player_count = count;
        self
    }

    /// External profile reference per seat, seat 0 first. Missing
    /// entries mean no profile.
    pub fn profiles(mut self, profiles: Vec<Option<u32>>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Build with a [`GameRng`] seeded from the rules config.
    pub fn build(self) -> Result<TurnEngine<GameRng>, GameError> {
        let rng = GameRng::new(self.config.seed);
        self.build_with(rng)
    }

    /// Build with an injected random source.
    pub fn build_with<R: RandomSource>(self, mut rng: R) -> Result<TurnEngine<R>, GameError> {
        let level = &self.level;
        level.validate()?;
        if self.player_count > level.starts.len() {
            return Err(GameError::InvalidLevel(format!(
                "{} players but only {} start cells",
                self.player_count,
                level.starts.len()
            )));
        }

        let mut next_id = 0u32;
        let mut fresh_id = || {
            let id = TileId(next_id);
            next_id += 1;
            id
        };

        let mut cells: Vec<Option<FloorTile>> = vec![None; level.width * level.height];
        for fixed_tile in &level.fixed_tiles {
            let orientation = Orientation::new(fixed_tile.orientation).unwrap_or_default();
            let tile = FloorTile::new(fresh_id(), fixed_tile.kind, orientation).fixed();
            cells[fixed_tile.coord.y * level.width + fixed_tile.coord.x] = Some(tile);
        }

        let mut supply = TileSupply::new();
        for kind in FloorKind::ALL {
            for _ in 0..level.floor_counts.get(kind) {
                let tile = FloorTile::new(fresh_id(), kind, rng.orientation());
                supply.return_tile(tile.into());
            }
        }

        for cell in cells.iter_mut().filter(|cell| cell.is_none()) {
            let tile = supply
                .draw(&mut rng)?
                .into_floor()
                .ok_or_else(|| GameError::InvalidLevel("drew an effect tile while filling the board".into()))?;
            *cell = Some(tile);
        }
        let cells = cells
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| GameError::InvalidLevel("board has an empty cell after setup".into()))?;
        let board = Board::from_cells(level.width, level.height, cells)?;

        for kind in EffectKind::ALL {
            for _ in 0..level.effect_counts.get(kind) {
                supply.return_tile(EffectTile::new(kind).into());
            }
        }

        let starts: Vec<_> = level
            .starts
            .iter()
            .take(self.player_count)
            .enumerate()
            .map(|(seat, &start)| (self.profiles.get(seat).copied().flatten(), start))
            .collect();

        info!(
            width = level.width,
            height = level.height,
            players = starts.len(),
            supply = supply.len(),
            "level set up"
        );
        let state = GameState::new(board, &starts, supply, self.config)?;
        Ok(TurnEngine::new(state, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coord, PlayerId};
    use crate::rules::PhaseKind;

    fn level() -> LevelDefinition {
        LevelDefinition::parse(
            "4 4  1  3 3 GOAL 0  0 0  3 0  0 3  1 1  6 4 6 0  1 2 1 1",
        )
        .unwrap()
    }

    #[test]
    fn test_build_fills_board_and_supply() {
        let engine = GameBuilder::new(level()).build().unwrap();
        let state = engine.state();

        assert_eq!(engine.phase_kind(), PhaseKind::Drawing);
        assert_eq!(engine.active_player(), PlayerId::new(0));
        assert_eq!(engine.clock().now(), 0);
        assert_eq!(engine.clock().turns_per_loop(), 4);

        // 16 floor tiles for 15 open cells: one floor tile plus five
        // effect tiles stay in the supply.
        assert_eq!(state.supply().len(), 6);
        assert_eq!(state.supply().effect_count(EffectKind::Fire), 2);

        let goal = state.board().tile_at(Coord::new(3, 3)).unwrap();
        assert!(goal.is_goal());
        assert!(goal.is_fixed());
        assert_eq!(state.board().iter().filter(|(_, t)| t.is_fixed()).count(), 1);
    }

    #[test]
    fn test_players_stand_on_starts() {
        let engine = GameBuilder::new(level())
            .player_count(2)
            .profiles(vec![Some(40), None])
            .build()
            .unwrap();
        let state = engine.state();

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.clock().turns_per_loop(), 2);
        assert_eq!(state.player_position(PlayerId::new(1)).unwrap(), Coord::new(3, 0));
        assert_eq!(state.player(PlayerId::new(0)).unwrap().profile(), Some(40));
        let history = state.player(PlayerId::new(1)).unwrap().history();
        assert_eq!(history.as_array(), [Coord::new(3, 0); 3]);
    }

    #[test]
    fn test_same_seed_same_board() {
        let config = RulesConfig::default().with_seed(9);
        let a = GameBuilder::new(level()).config(config.clone()).build().unwrap();
        let b = GameBuilder::new(level()).config(config).build().unwrap();
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_too_many_players_for_level() {
        let mut level = level();
        level.starts.truncate(2);
        let err = GameBuilder::new(level).player_count(3).build().err();
        assert!(matches!(err, Some(GameError::InvalidLevel(_))));
    }
}
