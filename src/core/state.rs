//! Game state: the board, the players, the supply and the clock.
//!
//! `GameState` owns everything the turn engine mutates and enforces the
//! occupancy link between players and tiles. Every operation here either
//! fully applies or returns an error before touching anything.

use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::config::RulesConfig;
use super::error::GameError;
use super::geometry::{Coord, DirectionMask};
use super::player::{PlayerId, PlayerMap, MAX_PLAYERS};
use super::rng::RandomSource;
use crate::board::{Board, InsertableLines, Insertion};
use crate::players::Player;
use crate::supply::TileSupply;
use crate::tiles::{FloorTile, Tile, TileId};

/// Complete mutable game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    players: PlayerMap<Player>,
    supply: TileSupply,
    clock: Clock,
    config: RulesConfig,
}

impl GameState {
    /// Seat one player per entry of `starts` (optional profile, start cell)
    /// and stand each on its start cell. The clock starts at 0 with one
    /// round lasting one turn per player.
    pub fn new(
        mut board: Board,
        starts: &[(Option<u32>, Coord)],
        supply: TileSupply,
        config: RulesConfig,
    ) -> Result<Self, GameError> {
        if starts.is_empty() || starts.len() > MAX_PLAYERS {
            return Err(GameError::InvalidLevel(format!(
                "need 1 to {MAX_PLAYERS} players, got {}",
                starts.len()
            )));
        }
        config.validate()?;

        let mut seated = Vec::with_capacity(starts.len());
        for (index, &(profile, start)) in starts.iter().enumerate() {
            let tile = board.tile_at_mut(start)?;
            if tile.occupant().is_some() {
                return Err(GameError::CellOccupied(start));
            }
            let mut player = Player::new(PlayerId::new(index as u8), profile, start);
            player.set_standing_on(None, tile);
            seated.push(player);
        }
        let players = PlayerMap::from_vec(seated)
            .ok_or_else(|| GameError::InvalidLevel("player count out of range".into()))?;

        Ok(Self {
            clock: Clock::new(players.player_count()),
            board,
            players,
            supply,
            config,
        })
    }

    /// Reassemble a state from stored parts, checking that every player
    /// and every occupied tile point at each other.
    pub fn from_parts(
        board: Board,
        players: PlayerMap<Player>,
        supply: TileSupply,
        clock: Clock,
        config: RulesConfig,
    ) -> Result<Self, GameError> {
        let count = players.player_count();
        if !(1..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::InvalidSnapshot(format!(
                "need 1 to {MAX_PLAYERS} players, got {count}"
            )));
        }
        config.validate()?;
        for (id, player) in players.iter() {
            if player.id() != id {
                return Err(GameError::InvalidSnapshot(format!(
                    "player in seat {} claims to be {}",
                    id.index(),
                    player.id()
                )));
            }
            let tile_id = player
                .standing_on()
                .ok_or_else(|| GameError::InvalidSnapshot(format!("{id} is not on the board")))?;
            let coord = board.position_of(tile_id).ok_or_else(|| {
                GameError::InvalidSnapshot(format!("{id} stands on {tile_id}, which is not on the board"))
            })?;
            if board.tile_at(coord)?.occupant() != Some(id) {
                return Err(GameError::InvalidSnapshot(format!(
                    "{tile_id} at {coord} does not list {id} as its occupant"
                )));
            }
        }
        for (coord, tile) in board.iter() {
            if let Some(occupant) = tile.occupant() {
                let standing_on = players
                    .get(occupant)
                    .ok_or_else(|| {
                        GameError::InvalidSnapshot(format!("tile at {coord} lists unseated {occupant}"))
                    })?
                    .standing_on();
                if standing_on != Some(tile.id()) {
                    return Err(GameError::InvalidSnapshot(format!(
                        "tile at {coord} lists {occupant}, who stands elsewhere"
                    )));
                }
            }
        }
        if clock.turns_per_loop() != players.player_count() as u64 {
            return Err(GameError::InvalidSnapshot(format!(
                "round length {} does not match {} players",
                clock.turns_per_loop(),
                players.player_count()
            )));
        }

        Ok(Self {
            board,
            players,
            supply,
            clock,
            config,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players.get_mut(id).ok_or(GameError::UnknownPlayer(id))
    }

    #[must_use]
    pub fn supply(&self) -> &TileSupply {
        &self.supply
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Cell `id` currently stands on.
    pub fn player_position(&self, id: PlayerId) -> Result<Coord, GameError> {
        let tile = self
            .player(id)?
            .standing_on()
            .ok_or_else(|| GameError::InvalidSnapshot(format!("{id} is not on the board")))?;
        self.board
            .position_of(tile)
            .ok_or_else(|| GameError::InvalidSnapshot(format!("{id} stands on {tile}, which is not on the board")))
    }

    /// Directions `id` may step in from where they stand.
    pub fn movable_directions(&self, id: PlayerId) -> Result<DirectionMask, GameError> {
        let from = self.player_position(id)?;
        self.board.movable_from(from, &self.clock)
    }

    #[must_use]
    pub fn insertable_lines(&self) -> InsertableLines {
        self.board.insertable_lines(&self.clock)
    }

    /// Move `id`'s occupancy to `to` without touching their history.
    pub fn relocate(&mut self, id: PlayerId, to: Coord) -> Result<(), GameError> {
        let from = self.player_position(id)?;
        if from == to {
            return Ok(());
        }
        if self.board.tile_at(to)?.occupant().is_some() {
            return Err(GameError::CellOccupied(to));
        }
        let (previous, next) = self.board.tile_pair_mut(from, to)?;
        let player = self.players.get_mut(id).ok_or(GameError::UnknownPlayer(id))?;
        player.set_standing_on(Some(previous), next);
        Ok(())
    }

    /// Step `id` onto `to` and record it in their history.
    pub fn move_player(&mut self, id: PlayerId, to: Coord) -> Result<(), GameError> {
        self.relocate(id, to)?;
        self.player_mut(id)?.add_to_past_positions(to);
        Ok(())
    }

    /// How far back `id` may be sent right now (0, 1 or 2).
    pub fn can_be_backtracked(&self, id: PlayerId) -> Result<u8, GameError> {
        let board = &self.board;
        let steps = self.player(id)?.can_be_backtracked(&self.clock, |coord, clock| {
            board.tile_at(coord).is_ok_and(|tile| tile.can_move_to(clock))
        });
        Ok(steps)
    }

    /// Send `target` back `steps` positions and use up their one backtrack.
    /// Returns the destination.
    pub fn backtrack(&mut self, target: PlayerId, steps: u8) -> Result<Coord, GameError> {
        if !(1..=2).contains(&steps) {
            return Err(GameError::InvalidBacktrackSteps(steps));
        }
        if steps > self.can_be_backtracked(target)? {
            return Err(GameError::BacktrackIneligible(target));
        }
        let destination = self
            .player(target)?
            .history()
            .get(usize::from(steps))
            .ok_or(GameError::InvalidBacktrackSteps(steps))?;
        self.relocate(target, destination)?;
        let player = self.player_mut(target)?;
        player.set_current_position(destination);
        player.mark_backtracked();
        Ok(destination)
    }

    /// Insert `tile` and return the displaced tile to the supply.
    ///
    /// Players on the shifted line keep their tiles, so their current
    /// position follows the tile. Their older positions are untouched.
    ///
    /// Returns the id of the tile that went back into the supply.
    pub fn insert_floor_tile(&mut self, tile: FloorTile, insertion: Insertion) -> Result<TileId, GameError> {
        let ejected = self.board.insert_floor_tile(tile, insertion, &mut self.players)?;
        for player in self.players.values_mut() {
            if let Some(coord) = player.standing_on().and_then(|id| self.board.position_of(id)) {
                player.set_current_position(coord);
            }
        }
        let id = ejected.id();
        self.supply.return_tile(ejected.into());
        Ok(id)
    }

    /// Burn the area around `center`, unless a player stands inside it.
    pub fn set_on_fire(&mut self, center: Coord) -> Result<(), GameError> {
        let radius = self.config.effect_radius;
        if !self.board.can_set_on_fire(center, radius)? {
            return Err(GameError::FireNearPlayer(center));
        }
        self.board
            .set_on_fire(center, radius, &self.clock, self.config.fire_rounds)
    }

    /// Freeze the area around `center`.
    pub fn set_freeze_on(&mut self, center: Coord) -> Result<(), GameError> {
        self.board.set_freeze_on(
            center,
            self.config.effect_radius,
            &self.clock,
            self.config.freeze_rounds,
        )
    }

    pub fn draw(&mut self, rng: &mut impl RandomSource) -> Result<Tile, GameError> {
        self.supply.draw(rng)
    }

    pub fn return_to_supply(&mut self, tile: Tile) {
        self.supply.return_tile(tile);
    }

    /// Close `active`'s turn: round their half tiles up and tick the clock.
    pub fn end_turn(&mut self, active: PlayerId) -> Result<(), GameError> {
        self.player_mut(active)?.effects_mut().settle();
        self.clock.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Orientation;
    use crate::tiles::FloorKind;

    /// A `size` × `size` board of goal tiles (open everywhere).
    fn open_board(size: usize) -> Board {
        let cells = (0..(size * size) as u32)
            .map(|id| FloorTile::new(TileId(id), FloorKind::Goal, Orientation::default()))
            .collect();
        Board::from_cells(size, size, cells).unwrap()
    }

    fn two_players() -> GameState {
        GameState::new(
            open_board(3),
            &[(None, Coord::new(0, 0)), (Some(7), Coord::new(2, 2))],
            TileSupply::new(),
            RulesConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_seats_players_on_starts() {
        let state = two_players();
        let p1 = PlayerId::new(1);

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.clock().turns_per_loop(), 2);
        assert_eq!(state.player_position(p1).unwrap(), Coord::new(2, 2));
        assert_eq!(state.player(p1).unwrap().profile(), Some(7));
        assert_eq!(state.board().tile_at(Coord::new(2, 2)).unwrap().occupant(), Some(p1));
    }

    #[test]
    fn test_new_rejects_shared_start() {
        let err = GameState::new(
            open_board(2),
            &[(None, Coord::new(1, 1)), (None, Coord::new(1, 1))],
            TileSupply::new(),
            RulesConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, GameError::CellOccupied(Coord::new(1, 1)));
    }

    #[test]
    fn test_move_player_updates_link_and_history() {
        let mut state = two_players();
        let p0 = PlayerId::new(0);

        state.move_player(p0, Coord::new(1, 0)).unwrap();

        assert_eq!(state.player_position(p0).unwrap(), Coord::new(1, 0));
        assert_eq!(state.board().tile_at(Coord::new(0, 0)).unwrap().occupant(), None);
        assert_eq!(state.board().tile_at(Coord::new(1, 0)).unwrap().occupant(), Some(p0));
        assert_eq!(state.player(p0).unwrap().history().get(0), Some(Coord::new(1, 0)));
        assert_eq!(state.player(p0).unwrap().history().get(1), Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_move_onto_other_player_fails() {
        let mut state = two_players();
        let before = state.clone();
        let err = state.move_player(PlayerId::new(0), Coord::new(2, 2)).unwrap_err();
        assert_eq!(err, GameError::CellOccupied(Coord::new(2, 2)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_backtrack_moves_without_history_push() {
        let mut state = two_players();
        let p0 = PlayerId::new(0);
        state.move_player(p0, Coord::new(1, 0)).unwrap();
        state.move_player(p0, Coord::new(1, 1)).unwrap();

        assert_eq!(state.can_be_backtracked(p0).unwrap(), 2);
        let to = state.backtrack(p0, 2).unwrap();

        assert_eq!(to, Coord::new(0, 0));
        assert_eq!(state.player_position(p0).unwrap(), Coord::new(0, 0));
        assert_eq!(state.player(p0).unwrap().history().get(0), Some(Coord::new(1, 1)));
        assert!(state.player(p0).unwrap().backtrack_used());
        assert_eq!(state.can_be_backtracked(p0).unwrap(), 0);
        assert_eq!(state.backtrack(p0, 1), Err(GameError::BacktrackIneligible(p0)));
    }

    #[test]
    fn test_backtrack_step_range() {
        let mut state = two_players();
        assert_eq!(
            state.backtrack(PlayerId::new(0), 3),
            Err(GameError::InvalidBacktrackSteps(3))
        );
        assert_eq!(
            state.backtrack(PlayerId::new(0), 0),
            Err(GameError::InvalidBacktrackSteps(0))
        );
    }

    #[test]
    fn test_fire_refused_next_to_player() {
        let mut state = two_players();
        assert_eq!(
            state.set_on_fire(Coord::new(1, 1)),
            Err(GameError::FireNearPlayer(Coord::new(1, 1)))
        );

        let mut state = GameState::new(
            open_board(5),
            &[(None, Coord::new(0, 0))],
            TileSupply::new(),
            RulesConfig::default(),
        )
        .unwrap();
        state.set_on_fire(Coord::new(3, 3)).unwrap();
        let tile = state.board().tile_at(Coord::new(4, 4)).unwrap();
        assert_eq!(tile.on_fire_until(), Some(2));
    }

    #[test]
    fn test_insert_returns_ejected_tile_to_supply() {
        let mut state = two_players();
        let tile = FloorTile::new(TileId(50), FloorKind::Straight, Orientation::default());

        let out = state.insert_floor_tile(tile, Insertion::from_left(1)).unwrap();

        assert_eq!(out, TileId(5));
        assert_eq!(state.supply().len(), 1);
        assert_eq!(state.board().tile_at(Coord::new(0, 1)).unwrap().id(), TileId(50));
    }

    #[test]
    fn test_from_parts_detects_broken_link() {
        let state = two_players();
        let mut board = state.board().clone();
        let stray = PlayerId::new(1);
        board
            .tile_at_mut(Coord::new(1, 1))
            .unwrap()
            .link_occupant(stray);

        let err = GameState::from_parts(
            board,
            state.players().clone(),
            state.supply().clone(),
            *state.clock(),
            state.config().clone(),
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidSnapshot(_)));

        let ok = GameState::from_parts(
            state.board().clone(),
            state.players().clone(),
            state.supply().clone(),
            *state.clock(),
            state.config().clone(),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_end_turn_settles_and_ticks() {
        let mut state = two_players();
        let p0 = PlayerId::new(0);
        state
            .player_mut(p0)
            .unwrap()
            .effects_mut()
            .credit_draw(crate::tiles::EffectKind::Ice);

        state.end_turn(p0).unwrap();

        assert_eq!(state.clock().now(), 1);
        assert_eq!(
            state.player(p0).unwrap().effects().available(crate::tiles::EffectKind::Ice),
            1
        );
    }
}
