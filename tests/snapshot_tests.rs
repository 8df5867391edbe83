//! Save and resume.

mod common;

use common::{first_legal, LEVEL};
use maze_shift::core::{Coord, GameError, GameRng, Orientation, MAX_EFFECT_RADIUS};
use maze_shift::level::{GameBuilder, LevelDefinition};
use maze_shift::rules::{Command, PhaseKind, TurnEngine};
use maze_shift::snapshot::GameSnapshot;
use maze_shift::tiles::FloorTile;
use maze_shift::RulesConfig;

fn engine(seed: u64) -> TurnEngine<GameRng> {
    let level = LevelDefinition::parse(LEVEL).unwrap();
    GameBuilder::new(level)
        .player_count(3)
        .profiles(vec![Some(7), None, Some(9)])
        .config(RulesConfig::default().with_seed(seed))
        .build()
        .unwrap()
}

fn snapshot_json(seed: u64) -> serde_json::Value {
    serde_json::to_value(GameSnapshot::capture(&engine(seed))).unwrap()
}

fn advance(engine: &mut TurnEngine<GameRng>, commands: usize) {
    for _ in 0..commands {
        let Some(command) = first_legal(engine) else {
            return;
        };
        engine.apply(command).unwrap();
    }
}

/// Test that a JSON round trip mid-turn resumes an identical game.
#[test]
fn test_json_round_trip_continues_identically() {
    let mut original = engine(11);
    advance(&mut original, 9);
    let snapshot = GameSnapshot::capture(&original);

    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);

    let mut resumed = decoded.restore(original.rng().clone()).unwrap();
    assert_eq!(resumed.state(), original.state());
    assert_eq!(resumed.phase(), original.phase());
    assert_eq!(resumed.active_player(), original.active_player());

    advance(&mut original, 20);
    advance(&mut resumed, 20);
    assert_eq!(resumed.state(), original.state());
    assert_eq!(resumed.phase(), original.phase());
}

/// Test that bincode bytes restore the pending tile and the profiles.
#[test]
fn test_bincode_round_trip_in_placement() {
    let mut engine = engine(5);
    for _ in 0..200 {
        if engine.phase_kind() == PhaseKind::Placement {
            break;
        }
        advance(&mut engine, 1);
    }
    assert_eq!(engine.phase_kind(), PhaseKind::Placement);
    let pending = engine.pending_tile().cloned();

    let bytes = GameSnapshot::capture(&engine).to_bytes().unwrap();
    let resumed = GameSnapshot::from_bytes(&bytes)
        .unwrap()
        .restore(GameRng::new(0))
        .unwrap();

    assert_eq!(resumed.pending_tile().cloned(), pending);
    assert_eq!(resumed.clock(), engine.clock());
    let profiles: Vec<_> = resumed
        .state()
        .players()
        .values()
        .map(|player| player.profile())
        .collect();
    assert_eq!(profiles, vec![Some(7), None, Some(9)]);
}

/// Test that a snapshot whose players and tiles disagree is refused.
#[test]
fn test_restore_rejects_broken_occupancy() {
    let engine = engine(3);
    let snapshot = GameSnapshot::capture(&engine);
    let json = serde_json::to_string(&snapshot).unwrap();
    // Player 1 still claims a tile, but the tile no longer names them.
    let json = json.replace("\"occupant\":1", "\"occupant\":null");
    assert_ne!(json, serde_json::to_string(&snapshot).unwrap());

    let broken: GameSnapshot = serde_json::from_str(&json).unwrap();
    let err = broken.restore(GameRng::new(3)).err();
    assert!(matches!(err, Some(GameError::InvalidSnapshot(_))));
}

/// Test that a board whose size and cells disagree is refused on load.
#[test]
fn test_load_rejects_misshapen_board() {
    for (width, height) in [(0, 5), (4, 5), (usize::MAX, 2)] {
        let mut json = snapshot_json(3);
        json["board"]["width"] = width.into();
        json["board"]["height"] = height.into();
        let err = serde_json::from_value::<GameSnapshot>(json).unwrap_err();
        assert!(err.to_string().contains("invalid snapshot"), "{width}x{height}: {err}");
    }

    let mut json = snapshot_json(3);
    json["board"]["cells"].as_array_mut().unwrap().pop();
    assert!(serde_json::from_value::<GameSnapshot>(json).is_err());
}

/// Test that a tile turned past three quarter turns is refused on load.
#[test]
fn test_load_rejects_bad_orientation() {
    let mut json = snapshot_json(3);
    json["board"]["cells"][0]["orientation"] = 9.into();
    assert!(serde_json::from_value::<GameSnapshot>(json).is_err());

    let mut json = snapshot_json(3);
    json["board"]["cells"][0]["orientation"] = 3.into();
    let snapshot: GameSnapshot = serde_json::from_value(json).unwrap();
    let tile = snapshot.board.tile_at(Coord::new(0, 0)).unwrap();
    let fresh = FloorTile::new(tile.id(), tile.kind(), Orientation::new(3).unwrap());
    assert_eq!(tile.raw_mask(), fresh.raw_mask());
}

/// Test that rules a game cannot be played with are refused on restore.
#[test]
fn test_restore_rejects_unplayable_config() {
    let mut snapshot = GameSnapshot::capture(&engine(3));
    snapshot.config.effect_radius = usize::MAX;
    let err = snapshot.restore(GameRng::new(3)).err();
    assert!(matches!(err, Some(GameError::InvalidConfig(_))));

    let level = LevelDefinition::parse(LEVEL).unwrap();
    let built = GameBuilder::new(level)
        .config(RulesConfig::default().with_effect_radius(MAX_EFFECT_RADIUS + 1))
        .build();
    assert!(matches!(built.err(), Some(GameError::InvalidConfig(_))));
}

/// Test that more seats than the game allows are refused on restore.
#[test]
fn test_restore_rejects_too_many_players() {
    let mut json = snapshot_json(3);
    let seats = json["players"]["data"].as_array_mut().unwrap();
    assert_eq!(seats.len(), 3);
    let extra = seats[0].clone();
    seats.push(extra.clone());
    seats.push(extra);

    let snapshot: GameSnapshot = serde_json::from_value(json).unwrap();
    let err = snapshot.restore(GameRng::new(3)).err();
    assert!(matches!(err, Some(GameError::InvalidSnapshot(_))));
}

/// Test that a finished game stays finished after a restore.
#[test]
fn test_restore_finished_game() {
    let mut engine = engine(21);
    advance(&mut engine, 2000);
    let snapshot = GameSnapshot::capture(&engine);
    let mut resumed = snapshot.restore(GameRng::new(21)).unwrap();

    assert_eq!(resumed.result(), engine.result());
    if engine.result().is_some() {
        assert_eq!(resumed.apply(Command::Draw), Err(GameError::GameOver));
    }
}
