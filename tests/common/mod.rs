//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use maze_shift::core::{Coord, GameState, Orientation, PlayerId, RandomSource, RulesConfig};
use maze_shift::rules::{Command, PhaseKind, TurnEngine};
use maze_shift::tiles::{EffectKind, FloorKind, FloorTile, Tile, TileId};
use maze_shift::{Board, TileSupply};

/// Random source whose next pick the test sets by hand.
#[derive(Clone, Debug, Default)]
pub struct Rigged(Rc<Cell<usize>>);

impl Rigged {
    pub fn set(&self, index: usize) {
        self.0.set(index);
    }
}

impl RandomSource for Rigged {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.get().min(len - 1)
    }
}

/// Build a board of `kind` tiles at `orientation`, ids numbered row-major.
pub fn uniform_board(width: usize, height: usize, kind: FloorKind, orientation: u8) -> Board {
    let orientation = Orientation::new(orientation).unwrap();
    let cells = (0..(width * height) as u32)
        .map(|id| FloorTile::new(TileId(id), kind, orientation))
        .collect();
    Board::from_cells(width, height, cells).unwrap()
}

pub fn floor(id: u32, kind: FloorKind) -> Tile {
    FloorTile::new(TileId(id), kind, Orientation::default()).into()
}

pub fn effect(kind: EffectKind) -> Tile {
    maze_shift::EffectTile::new(kind).into()
}

/// Seat players on `starts` with default rules.
pub fn state(board: Board, starts: &[Coord], supply: Vec<Tile>) -> GameState {
    let seats: Vec<_> = starts.iter().map(|&c| (None, c)).collect();
    GameState::new(board, &seats, TileSupply::from_tiles(supply), RulesConfig::default()).unwrap()
}

/// Draw the first supply tile matching `wanted`.
pub fn draw_where(engine: &mut TurnEngine<Rigged>, rigged: &Rigged, wanted: impl Fn(&Tile) -> bool) {
    let index = engine
        .state()
        .supply()
        .iter()
        .position(|tile| wanted(tile))
        .expect("no matching tile in the supply");
    rigged.set(index);
    engine.apply(Command::Draw).unwrap();
}

pub fn draw_floor(engine: &mut TurnEngine<Rigged>, rigged: &Rigged, kind: FloorKind) {
    draw_where(engine, rigged, |tile| matches!(tile, Tile::Floor(f) if f.kind() == kind));
}

pub fn draw_effect(engine: &mut TurnEngine<Rigged>, rigged: &Rigged, kind: EffectKind) {
    draw_where(engine, rigged, |tile| tile.effect_kind() == Some(kind));
}

pub fn position<R: RandomSource>(engine: &TurnEngine<R>, player: u8) -> Coord {
    engine.state().player_position(PlayerId::new(player)).unwrap()
}

/// Every player and the tile they stand on agree, and nobody else is listed.
pub fn assert_occupancy_consistent(state: &GameState) {
    let mut occupied = 0;
    for (coord, tile) in state.board().iter() {
        if let Some(player) = tile.occupant() {
            occupied += 1;
            assert_eq!(state.player_position(player).unwrap(), coord);
            assert_eq!(state.player(player).unwrap().standing_on(), Some(tile.id()));
        }
    }
    assert_eq!(occupied, state.player_count());
}

/// A 5x5 level with a fixed goal in the middle and all four corners as
/// starts.
pub const LEVEL: &str = "\
5 5
2
2 2 GOAL 0
0 2 TSHAPE 1
0 0  4 4  0 4  4 0
10 8 8 0
2 2 2 2
";

/// The first legal command in the current phase, if any.
///
/// Draws, inserts into the first open line, skips the action, and steps
/// in the first open direction.
pub fn first_legal<R: RandomSource>(engine: &TurnEngine<R>) -> Option<Command> {
    match engine.phase_kind() {
        PhaseKind::Drawing => Some(Command::Draw),
        PhaseKind::Placement => engine.insertable_lines().insertions().into_iter().next().map(Command::Insert),
        PhaseKind::PlayAction => Some(Command::Skip),
        PhaseKind::Movement => engine
            .movable_directions()
            .ok()
            .and_then(|mask| mask.open_directions().next())
            .map(Command::Move),
        PhaseKind::End => None,
    }
}
