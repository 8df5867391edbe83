//! The turn engine: a phase state machine driven by player commands.
//!
//! Each call to [`TurnEngine::apply`] validates the command against the
//! current phase, applies it in full, and returns the resulting events.
//! A rejected command leaves the engine exactly as it was.

use im::Vector;
use tracing::{debug, error, info, warn};

use crate::board::{InsertableLines, Insertion};
use crate::core::{Clock, Coord, Direction, DirectionMask, GameError, GameRng, GameState, PlayerId, RandomSource};
use crate::tiles::{EffectKind, FloorTile, Tile};

use super::command::{Command, TurnEvent, TurnEvents, TurnRecord};
use super::phase::{PhaseKind, TurnPhase};
use super::view::{self, BacktrackOption, CellView, PlayerView};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
    /// The winner's external profile reference.
    pub profile: Option<u32>,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Runs turns over a [`GameState`].
///
/// ## Usage
///
/// ```
/// use maze_shift::level::{GameBuilder, LevelDefinition};
/// use maze_shift::rules::{Command, PhaseKind};
///
/// let level = LevelDefinition::parse(
///     "3 3  0  0 0  2 2  0 2  2 0  12 0 0 0  0 0 0 0",
/// ).unwrap();
/// let mut engine = GameBuilder::new(level).player_count(2).build().unwrap();
///
/// engine.apply(Command::Draw).unwrap();
/// assert_eq!(engine.phase_kind(), PhaseKind::Placement);
/// ```
#[derive(Clone, Debug)]
pub struct TurnEngine<R: RandomSource = GameRng> {
    state: GameState,
    phase: TurnPhase,
    active: PlayerId,
    log: Vector<TurnRecord>,
    rng: R,
}

impl<R: RandomSource> TurnEngine<R> {
    /// Start a game: player 0 to draw.
    pub fn new(state: GameState, rng: R) -> Self {
        info!(
            players = state.player_count(),
            width = state.board().width(),
            height = state.board().height(),
            "game started"
        );
        Self {
            state,
            phase: TurnPhase::Drawing,
            active: PlayerId::new(0),
            log: Vector::new(),
            rng,
        }
    }

    /// Resume a game mid-turn.
    pub fn resume(state: GameState, phase: TurnPhase, active: PlayerId, rng: R) -> Result<Self, GameError> {
        if !state.players().contains(active) {
            return Err(GameError::InvalidSnapshot(format!(
                "active player {active} is not seated"
            )));
        }
        if let TurnPhase::End { winner } = phase {
            if !state.players().contains(winner) {
                return Err(GameError::InvalidSnapshot(format!("winner {winner} is not seated")));
            }
        }
        info!(player = %active, phase = ?phase.kind(), clock = state.clock().now(), "game resumed");
        Ok(Self {
            state,
            phase,
            active,
            log: Vector::new(),
            rng,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    #[must_use]
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        self.state.clock()
    }

    /// Board width and height.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.state.board().width(), self.state.board().height())
    }

    #[must_use]
    pub fn pending_tile(&self) -> Option<&FloorTile> {
        self.phase.pending_tile()
    }

    /// The winner, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            TurnPhase::End { winner } => Some(GameResult {
                winner,
                profile: self.state.player(winner).ok().and_then(|p| p.profile()),
            }),
            _ => None,
        }
    }

    /// Every command accepted so far, oldest first.
    #[must_use]
    pub fn log(&self) -> &Vector<TurnRecord> {
        &self.log
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    #[must_use]
    pub fn insertable_lines(&self) -> InsertableLines {
        self.state.insertable_lines()
    }

    /// Directions the active player could step in right now.
    pub fn movable_directions(&self) -> Result<DirectionMask, GameError> {
        self.state.movable_directions(self.active)
    }

    pub fn backtrack_options(&self) -> Result<Vec<BacktrackOption>, GameError> {
        view::backtrack_options(&self.state)
    }

    #[must_use]
    pub fn cells(&self) -> Vec<CellView> {
        view::cell_views(&self.state)
    }

    pub fn player_views(&self) -> Result<Vec<PlayerView>, GameError> {
        view::player_views(&self.state)
    }

    // === Commands ===

    /// Apply one command for the active player.
    pub fn apply(&mut self, command: Command) -> Result<TurnEvents, GameError> {
        let player = self.active;
        let clock = self.state.clock().now();
        let phase = self.phase.kind();
        // Arming only touches the phase; a refused or repeated arm leaves it as it was.
        let arming_from = matches!(command, Command::ChooseEffect(_)).then(|| self.phase.clone());

        let outcome = if self.phase.is_terminal() && command != Command::Redraw {
            Err(GameError::GameOver)
        } else {
            self.dispatch(command)
        };

        match &outcome {
            Ok(events) => {
                debug!(
                    player = %player,
                    command = command.name(),
                    from = ?phase,
                    to = ?self.phase.kind(),
                    clock,
                    events = events.len(),
                    "command applied"
                );
                let changed = arming_from.as_ref() != Some(&self.phase);
                if command != Command::Redraw && changed {
                    self.log.push_back(TurnRecord::new(player, command, clock));
                }
            }
            Err(err) if err.is_fatal() => {
                error!(player = %player, command = command.name(), %err, "game data is corrupt");
            }
            Err(err) => {
                warn!(player = %player, command = command.name(), ?phase, %err, "command rejected");
            }
        }
        outcome
    }

    fn dispatch(&mut self, command: Command) -> Result<TurnEvents, GameError> {
        match command {
            Command::Draw => self.draw(),
            Command::Rotate { delta } => self.rotate(delta),
            Command::Insert(insertion) => self.insert(insertion),
            Command::ChooseEffect(kind) => self.choose_effect(kind),
            Command::TargetCell(coord) => self.target_cell(coord),
            Command::Backtrack { player, steps } => self.backtrack(player, steps),
            Command::Move(direction) => self.step(direction),
            Command::Skip => self.skip(),
            Command::Redraw => Ok(TurnEvents::new()),
        }
    }

    fn wrong_phase(&self, command: Command) -> GameError {
        GameError::WrongPhase {
            command: command.name(),
            phase: self.phase.kind(),
        }
    }

    fn draw(&mut self) -> Result<TurnEvents, GameError> {
        if self.phase != TurnPhase::Drawing {
            return Err(self.wrong_phase(Command::Draw));
        }
        let mut events = TurnEvents::new();
        match self.state.draw(&mut self.rng)? {
            Tile::Floor(tile) => {
                events.push(TurnEvent::DrewFloor {
                    tile: tile.id(),
                    kind: tile.kind(),
                });
                if self.state.insertable_lines().any() {
                    self.phase = TurnPhase::Placement { tile };
                } else {
                    events.push(TurnEvent::PlacementSkipped { tile: tile.id() });
                    self.state.return_to_supply(tile.into());
                    self.phase = TurnPhase::PlayAction { armed: None };
                }
            }
            Tile::Effect(effect) => {
                self.state
                    .player_mut(self.active)?
                    .effects_mut()
                    .credit_draw(effect.kind());
                events.push(TurnEvent::DrewEffect(effect.kind()));
                self.phase = TurnPhase::PlayAction { armed: None };
            }
        }
        Ok(events)
    }

    fn rotate(&mut self, delta: i8) -> Result<TurnEvents, GameError> {
        let TurnPhase::Placement { tile } = &mut self.phase else {
            return Err(self.wrong_phase(Command::Rotate { delta }));
        };
        tile.rotate(delta)?;
        Ok(TurnEvents::from_iter([TurnEvent::Rotated {
            orientation: tile.orientation(),
        }]))
    }

    fn insert(&mut self, insertion: Insertion) -> Result<TurnEvents, GameError> {
        let TurnPhase::Placement { tile } = &self.phase else {
            return Err(self.wrong_phase(Command::Insert(insertion)));
        };
        let board = self.state.board();
        insertion.validate(board.width(), board.height())?;
        if !self.state.insertable_lines().allows(insertion) {
            return Err(GameError::LineNotInsertable);
        }
        let ejected = self.state.insert_floor_tile(tile.clone(), insertion)?;
        self.phase = TurnPhase::PlayAction { armed: None };
        Ok(TurnEvents::from_iter([TurnEvent::Inserted { insertion, ejected }]))
    }

    fn armed(&self, command: Command) -> Result<Option<EffectKind>, GameError> {
        match self.phase {
            TurnPhase::PlayAction { armed } => Ok(armed),
            _ => Err(self.wrong_phase(command)),
        }
    }

    fn require_available(&self, kind: EffectKind) -> Result<(), GameError> {
        if self.state.player(self.active)?.effects().available(kind) == 0 {
            return Err(GameError::NoEffectAvailable(kind));
        }
        Ok(())
    }

    fn choose_effect(&mut self, kind: EffectKind) -> Result<TurnEvents, GameError> {
        self.armed(Command::ChooseEffect(kind))?;
        self.require_available(kind)?;

        if kind == EffectKind::DoubleMove && self.state.movable_directions(self.active)?.is_closed() {
            return Ok(TurnEvents::from_iter([TurnEvent::NoAvailableMove {
                player: self.active,
            }]));
        }
        self.phase = TurnPhase::PlayAction { armed: Some(kind) };
        Ok(TurnEvents::from_iter([TurnEvent::EffectArmed(kind)]))
    }

    fn target_cell(&mut self, coord: Coord) -> Result<TurnEvents, GameError> {
        let kind = self
            .armed(Command::TargetCell(coord))?
            .ok_or(GameError::NoEffectChosen)?;
        if !kind.takes_cell_target() {
            return Err(GameError::EffectNeedsNoTarget(kind));
        }
        self.require_available(kind)?;

        let mut events = TurnEvents::new();
        if kind == EffectKind::Fire {
            self.state.set_on_fire(coord)?;
            events.push(TurnEvent::FireSet(coord));
        } else {
            self.state.set_freeze_on(coord)?;
            events.push(TurnEvent::IceSet(coord));
        }
        self.state.player_mut(self.active)?.effects_mut().consume(kind)?;
        self.enter_movement(&mut events)?;
        Ok(events)
    }

    fn backtrack(&mut self, target: PlayerId, steps: u8) -> Result<TurnEvents, GameError> {
        let armed = self.armed(Command::Backtrack { player: target, steps })?;
        if armed != Some(EffectKind::Backtrack) {
            return Err(GameError::NoEffectChosen);
        }
        self.require_available(EffectKind::Backtrack)?;

        let to = self.state.backtrack(target, steps)?;
        self.state
            .player_mut(self.active)?
            .effects_mut()
            .consume(EffectKind::Backtrack)?;

        let mut events = TurnEvents::from_iter([TurnEvent::Backtracked { player: target, to }]);
        self.enter_movement(&mut events)?;
        Ok(events)
    }

    fn step(&mut self, direction: Direction) -> Result<TurnEvents, GameError> {
        let extra = match self.phase {
            TurnPhase::PlayAction {
                armed: Some(EffectKind::DoubleMove),
            } => {
                self.require_available(EffectKind::DoubleMove)?;
                true
            }
            TurnPhase::Movement => false,
            _ => return Err(self.wrong_phase(Command::Move(direction))),
        };

        let player = self.active;
        let from = self.state.player_position(player)?;
        let to = self
            .state
            .board()
            .step_target(from, direction, self.state.clock())?
            .ok_or(GameError::MoveNotAllowed(direction))?;

        self.state.move_player(player, to)?;
        if extra {
            self.state
                .player_mut(player)?
                .effects_mut()
                .consume(EffectKind::DoubleMove)?;
        }
        let mut events = TurnEvents::from_iter([TurnEvent::Moved { player, to, extra }]);

        if self.state.board().tile_at(to)?.is_goal() {
            info!(player = %player, clock = self.state.clock().now(), "goal reached");
            self.phase = TurnPhase::End { winner: player };
            events.push(TurnEvent::Won(player));
        } else if extra {
            self.enter_movement(&mut events)?;
        } else {
            self.end_turn(&mut events)?;
        }
        Ok(events)
    }

    fn skip(&mut self) -> Result<TurnEvents, GameError> {
        self.armed(Command::Skip)?;
        let mut events = TurnEvents::new();
        self.enter_movement(&mut events)?;
        Ok(events)
    }

    /// Enter the movement phase, or end the turn at once if boxed in.
    fn enter_movement(&mut self, events: &mut TurnEvents) -> Result<(), GameError> {
        if self.state.movable_directions(self.active)?.is_closed() {
            events.push(TurnEvent::NoAvailableMove { player: self.active });
            return self.end_turn(events);
        }
        self.phase = TurnPhase::Movement;
        Ok(())
    }

    fn end_turn(&mut self, events: &mut TurnEvents) -> Result<(), GameError> {
        self.state.end_turn(self.active)?;
        self.active = self.active.next(self.state.player_count());
        self.phase = TurnPhase::Drawing;
        events.push(TurnEvent::TurnEnded { next: self.active });
        Ok(())
    }
}
