//! Game state module - manages the complete session
//!
//! This module ties together the field, pieces, the piece source and scoring.
//! It handles gravity timing, piece movement, rotation, locking, line clears,
//! leveling and the Running / LevelUp / GameOver state machine.
//!
//! All timing is driven by the `dt` passed to [`GameState::tick`]; the engine
//! never reads a clock, so a sequence of `(dt, action)` pairs always produces
//! the same game.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::field::Field;
use crate::pieces::{try_rotate, Piece};
use crate::rng::PieceGenerator;
use crate::scoring::{gravity_interval, level_for_lines, line_clear_score};
use crate::snapshot::GameSnapshot;
use crate::types::{Action, Phase, LEVEL_UP_PAUSE_MS};

/// Pause between entering LevelUp and resuming play
pub const LEVEL_UP_PAUSE: Duration = Duration::from_millis(LEVEL_UP_PAUSE_MS);

/// What happened when a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: usize,
    /// Points awarded for this lock
    pub points: u32,
    /// Level after the lock
    pub level: u32,
    pub leveled_up: bool,
    /// The follow-up spawn was blocked
    pub game_over: bool,
}

/// Complete game state
pub struct GameState {
    config: GameConfig,
    field: Field,
    active: Option<Piece>,
    next: Option<Piece>,
    pieces: Box<dyn Iterator<Item = Piece> + Send>,
    score: u32,
    cleared_lines: u32,
    level: u32,
    phase: Phase,
    /// Countdown until LevelUp ends
    state_timer: Duration,
    /// Gravity time not yet applied
    physics_acc: Duration,
    /// Session time, frozen at game over
    elapsed: Duration,
}

impl GameState {
    /// Start a session with the configured piece generator
    ///
    /// The first piece is spawned before this returns.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let pieces = PieceGenerator::new(config.generator, config.seed);
        Self::with_pieces(config, pieces)
    }

    /// Start a session drawing from a caller-supplied piece source
    ///
    /// The source should be infinite; if it runs dry the session ends in
    /// GameOver at the next spawn.
    pub fn with_pieces(
        config: GameConfig,
        pieces: impl Iterator<Item = Piece> + Send + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = Field::new(config.width, config.height);
        Ok(Self::start(config, field, Box::new(pieces)))
    }

    /// Start a session on a prepared field
    ///
    /// The field's dimensions replace `config.width`/`config.height`.
    pub fn with_field(
        config: GameConfig,
        field: Field,
        pieces: impl Iterator<Item = Piece> + Send + 'static,
    ) -> Result<Self, ConfigError> {
        let config = GameConfig {
            width: u16::try_from(field.width()).unwrap_or(u16::MAX),
            height: u16::try_from(field.height()).unwrap_or(u16::MAX),
            ..config
        };
        config.validate()?;
        Ok(Self::start(config, field, Box::new(pieces)))
    }

    fn start(
        config: GameConfig,
        field: Field,
        pieces: Box<dyn Iterator<Item = Piece> + Send>,
    ) -> Self {
        let mut state = Self {
            config,
            field,
            active: None,
            next: None,
            pieces,
            score: 0,
            cleared_lines: 0,
            level: 1,
            phase: Phase::Running,
            state_timer: Duration::ZERO,
            physics_acc: Duration::ZERO,
            elapsed: Duration::ZERO,
        };
        debug!(
            "session start: {}x{} field, {} generator, {} lines per level",
            state.field.width(),
            state.field.height(),
            config.generator.as_str(),
            config.lines_per_level
        );
        state.spawn_piece();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_leveling_up(&self) -> bool {
        self.phase == Phase::LevelUp
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Time left in the LevelUp pause (zero outside LevelUp)
    pub fn state_timer(&self) -> Duration {
        self.state_timer
    }

    /// Gravity time accumulated but not yet applied
    pub fn physics_accumulator(&self) -> Duration {
        self.physics_acc
    }

    /// Session time fed in through `tick`
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current gravity interval
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.level)
    }

    /// Advance the session by `dt`, applying at most one action
    ///
    /// Order within a tick: LevelUp countdown, the action, then gravity.
    /// Returns the lock performed during this tick, if any; a tick locks at
    /// most once.
    pub fn tick(&mut self, dt: Duration, action: Option<Action>) -> Option<LockEvent> {
        if self.phase == Phase::GameOver {
            return None;
        }
        self.elapsed += dt;

        if self.phase == Phase::LevelUp {
            self.state_timer = self.state_timer.saturating_sub(dt);
            if self.state_timer.is_zero() {
                self.phase = Phase::Running;
                self.physics_acc = Duration::ZERO;
                debug!("resuming at level {}", self.level);
            }
        }

        if self.phase != Phase::Running {
            return None;
        }

        let locked = action.and_then(|a| self.apply_action(a));
        if self.phase != Phase::Running {
            return locked;
        }

        self.physics_acc += dt;
        if locked.is_some() {
            return locked;
        }
        self.apply_gravity()
    }

    /// Apply one action to the active piece (no-op outside Running)
    ///
    /// Returns the lock event when the action was a hard drop.
    pub fn apply_action(&mut self, action: Action) -> Option<LockEvent> {
        if self.phase != Phase::Running {
            return None;
        }
        match action {
            Action::MoveLeft => {
                self.try_move(-1, 0);
                None
            }
            Action::MoveRight => {
                self.try_move(1, 0);
                None
            }
            Action::SoftDrop => {
                self.try_move(0, 1);
                None
            }
            Action::Rotate => {
                self.try_rotate();
                None
            }
            Action::HardDrop => self.hard_drop(),
        }
    }

    /// Consume whole gravity intervals from the accumulator
    fn apply_gravity(&mut self) -> Option<LockEvent> {
        let interval = self.gravity_interval();
        while self.physics_acc >= interval {
            self.physics_acc -= interval;
            if !self.try_move(0, 1) {
                return self.lock_piece();
            }
        }
        None
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !self.field.can_place(active, dx, dy) {
            return false;
        }
        active.x += dx;
        active.y += dy;
        true
    }

    /// Try to rotate the active piece with wall kicks
    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let field = &self.field;
        let Some((shape, (dx, dy))) = try_rotate(active, |s, x, y| field.fits(s, x, y)) else {
            return false;
        };
        active.shape = shape;
        active.x += dx;
        active.y += dy;
        true
    }

    /// Drop to the ghost row and lock
    fn hard_drop(&mut self) -> Option<LockEvent> {
        let ghost_y = self.ghost_y()?;
        if let Some(active) = self.active.as_mut() {
            active.y = ghost_y;
        }
        self.lock_piece()
    }

    /// Row the active piece would come to rest on if dropped now
    pub fn ghost_y(&self) -> Option<i32> {
        let active = self.active.as_ref()?;
        let mut dy = 0;
        while self.field.can_place(active, 0, dy + 1) {
            dy += 1;
        }
        Some(active.y + dy)
    }

    /// Lock the active piece, clear lines, score, level and spawn the next piece
    fn lock_piece(&mut self) -> Option<LockEvent> {
        let piece = self.active.take()?;
        self.field.merge(&piece);

        let lines_cleared = self.field.clear_lines();
        let mut points = 0;
        let mut leveled_up = false;

        if lines_cleared > 0 {
            points = line_clear_score(lines_cleared);
            self.score = self.score.saturating_add(points);
            self.cleared_lines = self.cleared_lines.saturating_add(lines_cleared as u32);

            let level = level_for_lines(self.cleared_lines, self.config.lines_per_level);
            if level > self.level {
                self.level = level;
                self.phase = Phase::LevelUp;
                self.state_timer = LEVEL_UP_PAUSE;
                leveled_up = true;
                info!("level up: {} ({} lines)", self.level, self.cleared_lines);
            }
        }

        debug!(
            "locked {:?} at ({}, {}): {} lines, +{} points",
            piece.kind, piece.x, piece.y, lines_cleared, points
        );

        self.spawn_piece();

        Some(LockEvent {
            lines_cleared,
            points,
            level: self.level,
            leveled_up,
            game_over: self.phase == Phase::GameOver,
        })
    }

    /// Promote the queued piece, refill the queue and test the spawn
    fn spawn_piece(&mut self) {
        let Some(mut piece) = self.next.take().or_else(|| self.pieces.next()) else {
            warn!("piece source exhausted");
            self.enter_game_over();
            return;
        };
        self.next = self.pieces.next();

        let (x, y) = self.spawn_position(&piece);
        piece.x = x;
        piece.y = y;

        let blocked = !self.field.can_place(&piece, 0, 0);
        debug!("spawn {:?} at ({}, {})", piece.kind, x, y);
        self.active = Some(piece);

        if blocked {
            self.enter_game_over();
        }
    }

    /// Horizontally centered, with the topmost block on row 0
    fn spawn_position(&self, piece: &Piece) -> (i32, i32) {
        let x = (self.field.width() - piece.width()).div_euclid(2);
        let y = -piece.shape.top_padding();
        (x, y)
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.state_timer = Duration::ZERO;
        info!(
            "game over: score {}, level {}, {} lines",
            self.score, self.level, self.cleared_lines
        );
    }

    /// Refresh `out` with the current state, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.write_rows_into(&mut out.grid);
        out.width = self.field.width();
        out.height = self.field.height();
        out.active.clone_from(&self.active);
        out.next.clone_from(&self.next);
        out.ghost_y = self.ghost_y();
        out.level = self.level;
        out.score = self.score;
        out.cleared_lines = self.cleared_lines;
        out.phase = self.phase;
        out.elapsed = self.elapsed;
    }

    /// Owned, detached view of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("config", &self.config)
            .field("field", &self.field)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("score", &self.score)
            .field("cleared_lines", &self.cleared_lines)
            .field("level", &self.level)
            .field("phase", &self.phase)
            .field("state_timer", &self.state_timer)
            .field("physics_acc", &self.physics_acc)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn only(kind: PieceKind) -> impl Iterator<Item = Piece> + Send {
        std::iter::repeat_with(move || Piece::new(kind))
    }

    fn game_with(kind: PieceKind) -> GameState {
        GameState::with_pieces(GameConfig::default(), only(kind)).unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default()).unwrap();

        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.cleared_lines, 0);
        assert!(state.active.is_some());
        assert!(state.next.is_some());
        assert_eq!(state.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let err = GameState::new(GameConfig::default().with_size(0, 20)).unwrap_err();
        assert_eq!(err, ConfigError::ZeroWidth);
    }

    #[test]
    fn test_spawn_position_centers_piece() {
        let state = game_with(PieceKind::O);
        let active = state.active.as_ref().unwrap();
        assert_eq!((active.x, active.y), (4, 0));

        let state = game_with(PieceKind::I);
        let active = state.active.as_ref().unwrap();
        // The I shape's empty top row sits above the field.
        assert_eq!((active.x, active.y), (3, -1));

        let state = game_with(PieceKind::T);
        let active = state.active.as_ref().unwrap();
        assert_eq!((active.x, active.y), (3, 0));
    }

    #[test]
    fn test_try_move_walls() {
        let mut state = game_with(PieceKind::O);

        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        assert_eq!(moved, 4);
        assert_eq!(state.active.as_ref().unwrap().x, 0);
        assert!(!state.try_move(-1, 0));
    }

    #[test]
    fn test_rotate_commits_shape() {
        let mut state = game_with(PieceKind::T);
        let before = state.active.clone().unwrap();

        assert!(state.try_rotate());
        let after = state.active.clone().unwrap();
        assert_eq!(after.shape, before.rotate());
        assert_eq!((after.x, after.y), (before.x, before.y));
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let mut state = game_with(PieceKind::I);
        assert!(state.try_rotate());
        // Vertical I: blocks in column x + 1. Push it to the right wall.
        while state.try_move(1, 0) {}
        let vertical = state.active.clone().unwrap();
        assert_eq!(vertical.x + 1, 9);

        // Turning back to horizontal at x = 8 needs columns 8..=11; the first
        // offsets that fit are -2.
        assert!(state.try_rotate());
        let horizontal = state.active.clone().unwrap();
        assert_eq!(horizontal.x, vertical.x - 2);
        assert!(state.field.can_place(&horizontal, 0, 0));
    }

    #[test]
    fn test_ghost_y_on_empty_field() {
        let state = game_with(PieceKind::O);
        assert_eq!(state.ghost_y(), Some(18));

        let state = game_with(PieceKind::I);
        assert_eq!(state.ghost_y(), Some(18));
    }

    #[test]
    fn test_soft_drop_never_locks() {
        let mut state = game_with(PieceKind::O);
        for _ in 0..30 {
            assert!(state.tick(Duration::ZERO, Some(Action::SoftDrop)).is_none());
        }
        assert_eq!(state.active.as_ref().unwrap().y, 18);
        assert!(state.field.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_hard_drop_locks_in_one_tick() {
        let mut state = game_with(PieceKind::O);
        let event = state.tick(Duration::ZERO, Some(Action::HardDrop)).unwrap();

        assert_eq!(event.lines_cleared, 0);
        assert!(!event.game_over);
        assert_eq!(state.field.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.field.get(5, 18), Some(Some(PieceKind::O)));
        // A fresh piece is active again.
        assert_eq!(state.active.as_ref().unwrap().y, 0);
    }

    #[test]
    fn test_gravity_accumulates_partial_time() {
        let mut state = game_with(PieceKind::O);
        state.tick(ms(200), None);
        assert_eq!(state.active.as_ref().unwrap().y, 0);
        assert_eq!(state.physics_acc, ms(200));

        state.tick(ms(200), None);
        assert_eq!(state.active.as_ref().unwrap().y, 1);
        assert_eq!(state.physics_acc, ms(100));
    }

    #[test]
    fn test_gravity_locks_at_most_once_per_tick() {
        let mut state = game_with(PieceKind::O);
        // Enough time for far more than one piece's fall.
        let event = state.tick(Duration::from_secs(60), None);
        assert!(event.is_some());

        let locked = state.field.cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(locked, 4);
        // The leftover time is kept for the next tick.
        assert!(state.physics_acc > Duration::ZERO);
    }

    #[test]
    fn test_hard_drop_does_not_consume_gravity_in_same_tick() {
        let mut state = game_with(PieceKind::O);
        state.tick(ms(900), Some(Action::HardDrop));
        assert_eq!(state.active.as_ref().unwrap().y, 0);
        assert_eq!(state.physics_acc, ms(900));
    }

    #[test]
    fn test_level_up_pause_and_resume() {
        let field = Field::from_text(&[
            "..........",
            "..........",
            "..........",
            "..........",
            "OOOO..OOOO",
            "OOOO..OOOO",
        ])
        .unwrap();
        let mut state =
            GameState::with_field(GameConfig::default(), field, only(PieceKind::O)).unwrap();

        let event = state.tick(ms(10), Some(Action::HardDrop)).unwrap();
        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.points, 400);
        assert!(event.leveled_up);
        assert_eq!(state.level, 3);
        assert_eq!(state.phase, Phase::LevelUp);
        assert_eq!(state.state_timer, LEVEL_UP_PAUSE);

        // Actions and gravity are ignored during the pause.
        let before = state.active.clone();
        state.tick(ms(300), Some(Action::MoveLeft));
        assert_eq!(state.active, before);
        assert_eq!(state.phase, Phase::LevelUp);

        // The countdown expires: play resumes with a zeroed accumulator,
        // then this tick's time is added.
        state.tick(ms(200), None);
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.physics_acc, ms(200));
    }

    #[test]
    fn test_blocked_spawn_is_game_over_and_terminal() {
        let field = Field::from_text(&["....ZZ....", "..........", ".........."]).unwrap();
        let mut state =
            GameState::with_field(GameConfig::default(), field, only(PieceKind::O)).unwrap();
        assert_eq!(state.phase, Phase::GameOver);

        let grid = state.field.clone();
        state.tick(Duration::from_secs(5), Some(Action::HardDrop));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.field, grid);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_exhausted_source_ends_session() {
        let pieces = vec![Piece::new(PieceKind::O)].into_iter();
        let mut state = GameState::with_pieces(GameConfig::default(), pieces).unwrap();
        assert_eq!(state.phase, Phase::Running);
        assert!(state.next.is_none());

        let event = state.tick(Duration::ZERO, Some(Action::HardDrop)).unwrap();
        assert!(event.game_over);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = game_with(PieceKind::O);
        let snap = state.snapshot();
        state.tick(Duration::ZERO, Some(Action::HardDrop));

        assert!(snap.grid.iter().flatten().all(|c| c.is_none()));
        assert_eq!(snap.active.as_ref().unwrap().y, 0);
        assert_ne!(state.snapshot().grid, snap.grid);
    }
}
