//! Game engine - drives a [`GameState`] from timers and input
//!
//! The engine owns the only clock ([`TimerQueue`]) and runs the piece lifecycle:
//!
//! ```text
//! Idle -> Spawning -> Falling -> Fixing -> Resolving -> CheckingGameOver
//!                        ^                                   |
//!                        +------------ Spawning <------------+--> GameOver
//! ```
//!
//! Drop timer fires advance the active piece; a blocked advance fixes it and runs
//! the cascade (in one call, or one staged step per `removal_delay_ms`). While a
//! piece is fixing or resolving there is no live drop timer, so at most one
//! advance or resolution is ever in flight.

use tracing::{debug, info, warn};

use crate::core::{
    Advance, Board, CascadeStep, GameConfig, GameSnapshot, GameState, RandomSource, SimpleRng,
    StagedCascade,
};
use crate::drop::DropScheduler;
use crate::error::EngineError;
use crate::observer::EngineObserver;
use crate::readiness::ReadinessGate;
use crate::scheduler::{Scheduler, TimerHandle, TimerKind, TimerQueue};
use crate::types::{DropMode, GameAction, Phase, Pos, ResolveMode};

pub struct GameEngine<R = SimpleRng> {
    config: GameConfig,
    state: GameState<R>,
    timers: TimerQueue,
    drop: DropScheduler,
    cascade: Option<StagedCascade>,
    cascade_timer: Option<TimerHandle>,
    observer: Option<Box<dyn EngineObserver>>,
    snapshot: GameSnapshot,
    started: bool,
    best_score: u32,
    episode: u32,
    game_over_notified: bool,
}

impl GameEngine<SimpleRng> {
    /// Engine seeded from `config.seed` (or `fallback_seed` when unset).
    pub fn from_config(config: GameConfig, fallback_seed: u32) -> Result<Self, EngineError> {
        let seed = config.seed.unwrap_or(fallback_seed);
        Self::new(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource + Clone> GameEngine<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        let state = GameState::new(&config, rng);
        Ok(Self {
            drop: DropScheduler::new(config.natural_drop_ms, config.soft_drop_ms),
            snapshot: GameSnapshot::new(config.rows, config.columns),
            config,
            state,
            timers: TimerQueue::new(),
            cascade: None,
            cascade_timer: None,
            observer: None,
            started: false,
            best_score: 0,
            episode: 0,
            game_over_notified: false,
        })
    }

    pub fn set_observer(&mut self, observer: Box<dyn EngineObserver>) {
        self.observer = Some(observer);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    /// Best score this session, including the game in progress.
    pub fn best_score(&self) -> u32 {
        self.best_score.max(self.state.score())
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn active(&self) -> Option<crate::core::ActivePiece> {
        self.state.active()
    }

    pub fn next(&self) -> crate::core::ActivePiece {
        self.state.next()
    }

    pub fn drop_mode(&self) -> DropMode {
        self.drop.mode()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::new(self.config.rows, self.config.columns);
        self.snapshot_into(&mut snap);
        snap
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
        out.drop_mode = self.drop.mode();
        out.best_score = self.best_score();
        out.episode_id = self.episode;
    }

    /// Begin play once the readiness barrier is open. Later calls are no-ops.
    pub fn start(&mut self, gate: &ReadinessGate) -> Result<(), EngineError> {
        let expected = usize::from(self.config.identities);
        if gate.identities() != expected {
            return Err(EngineError::GateMismatch {
                expected,
                found: gate.identities(),
            });
        }
        if !gate.is_open() {
            return Err(EngineError::NotReady {
                remaining: gate.remaining(),
            });
        }
        if self.started {
            return Ok(());
        }
        self.started = true;
        info!(
            rows = self.config.rows,
            columns = self.config.columns,
            mode = self.config.resolve_mode.as_str(),
            "game started"
        );
        self.state.set_phase(Phase::Spawning);
        self.begin_falling();
        Ok(())
    }

    /// Discard the current game and start a fresh one on the same random stream.
    pub fn reset(&mut self) {
        self.drop.disarm(&mut self.timers);
        self.cancel_cascade();
        self.timers.clear();

        self.best_score = self.best_score();
        let rng = self.state.spawner().rng().clone();
        self.state = GameState::new(&self.config, rng);
        self.episode += 1;
        self.game_over_notified = false;
        info!(episode = self.episode, "game reset");

        if self.started {
            self.state.set_phase(Phase::Spawning);
            self.begin_falling();
        } else {
            self.render();
        }
    }

    /// Replace the settled board with a preset of the same dimensions.
    ///
    /// Only allowed before start or while a piece is falling, and never with a
    /// settled cell under the active piece.
    pub fn load_board(&mut self, board: Board) -> Result<(), EngineError> {
        let expected = (self.config.rows, self.config.columns);
        let found = (board.rows(), board.columns());
        if expected != found {
            return Err(EngineError::BoardMismatch { expected, found });
        }
        let phase = self.state.phase();
        if self.cascade.is_some() || !matches!(phase, Phase::Idle | Phase::Falling) {
            return Err(EngineError::Busy(phase));
        }
        if let Some(active) = self.state.active() {
            if let (Ok(row), Ok(col)) = (usize::try_from(active.row), usize::try_from(active.col)) {
                if board.is_occupied(Pos::new(row, col)) {
                    return Err(EngineError::ActiveOverlap { row, col });
                }
            }
        }
        if self.state.replace_board(board) {
            self.render();
        }
        Ok(())
    }

    /// Advance the clock by `elapsed_ms` and fire every timer that falls due,
    /// including timers armed by earlier fires in the same advance.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let until = self.timers.now_ms() + u64::from(elapsed_ms);
        while let Some((handle, kind)) = self.timers.pop_due(until) {
            match kind {
                TimerKind::Drop => self.on_drop_timer(handle),
                TimerKind::CascadeStep => self.on_cascade_timer(handle),
            }
        }
        self.timers.advance_to(until);
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    pub fn soft_drop_start(&mut self) -> bool {
        self.set_soft_drop(true)
    }

    pub fn soft_drop_end(&mut self) -> bool {
        self.set_soft_drop(false)
    }

    /// Returns whether the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDropStart => self.soft_drop_start(),
            GameAction::SoftDropEnd => self.soft_drop_end(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    fn shift(&mut self, d_col: i32) -> bool {
        if !self.state.try_shift(d_col) {
            return false;
        }
        self.render();
        true
    }

    /// Mode edges are tracked in every phase; with no live timer (game over,
    /// fixing, resolving) the mode is only recorded.
    fn set_soft_drop(&mut self, on: bool) -> bool {
        self.drop.set_soft_drop(&mut self.timers, on)
    }

    fn on_drop_timer(&mut self, handle: TimerHandle) {
        if !self.drop.accept(handle) {
            debug!(id = handle.id(), "stale drop timer ignored");
            return;
        }
        match self.state.try_advance() {
            Advance::Moved => {
                self.drop.arm(&mut self.timers);
                self.render();
            }
            Advance::Blocked => self.fix_and_resolve(),
            Advance::Idle => {}
        }
    }

    fn fix_and_resolve(&mut self) {
        self.drop.disarm(&mut self.timers);
        match self.state.fix_active() {
            Ok(Some(pos)) => debug!(row = pos.row, col = pos.col, "piece fixed"),
            Ok(None) => {}
            Err(err) => warn!(%err, "failed to fix active piece"),
        }
        self.render();

        match self.config.resolve_mode {
            ResolveMode::Atomic => {
                let report = self.state.resolve();
                if !report.is_empty() {
                    debug!(
                        chain = report.passes,
                        groups = report.groups,
                        points = report.points,
                        "cascade resolved"
                    );
                    self.render();
                }
                self.finish_resolution();
            }
            ResolveMode::Staged => {
                self.cascade = Some(StagedCascade::new(self.config.adjacency));
                self.cascade_step();
            }
        }
    }

    fn on_cascade_timer(&mut self, handle: TimerHandle) {
        if self.cascade_timer != Some(handle) {
            return;
        }
        self.cascade_timer = None;
        self.cascade_step();
    }

    /// Apply one staged removal; schedule the next or finish the cascade.
    fn cascade_step(&mut self) {
        let Some(mut staged) = self.cascade.take() else {
            return;
        };
        match self.state.resolve_step(&mut staged) {
            CascadeStep::Removed(_) => {
                self.cascade = Some(staged);
                self.cascade_timer = Some(
                    self.timers
                        .schedule(self.config.removal_delay_ms, TimerKind::CascadeStep),
                );
                self.render();
            }
            CascadeStep::Settled => {
                let report = staged.report();
                if !report.is_empty() {
                    debug!(
                        chain = report.passes,
                        groups = report.groups,
                        points = report.points,
                        "staged cascade settled"
                    );
                }
                self.finish_resolution();
            }
        }
    }

    fn cancel_cascade(&mut self) {
        if let Some(handle) = self.cascade_timer.take() {
            self.timers.cancel(handle);
        }
        self.cascade = None;
    }

    fn finish_resolution(&mut self) {
        if self.state.check_game_over() {
            self.enter_game_over();
            return;
        }
        self.state.promote_next();
        self.begin_falling();
    }

    fn begin_falling(&mut self) {
        self.state.set_phase(Phase::Falling);
        self.drop.arm(&mut self.timers);
        self.render();
    }

    fn enter_game_over(&mut self) {
        self.drop.disarm(&mut self.timers);
        self.cancel_cascade();
        self.best_score = self.best_score();
        let score = self.state.score();
        info!(score, best = self.best_score, episode = self.episode, "game over");
        self.render();

        if self.game_over_notified {
            return;
        }
        self.game_over_notified = true;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_game_over(score);
        }
    }

    fn render(&mut self) {
        if self.observer.is_none() {
            return;
        }
        let mut snap = std::mem::replace(&mut self.snapshot, GameSnapshot::new(0, 0));
        self.snapshot_into(&mut snap);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_render(&snap);
        }
        self.snapshot = snap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSource;

    fn config(rows: usize, columns: usize) -> GameConfig {
        GameConfig {
            rows,
            columns,
            identities: 4,
            natural_drop_ms: 100,
            soft_drop_ms: 10,
            ..GameConfig::default()
        }
    }

    fn open_gate() -> ReadinessGate {
        let mut gate = ReadinessGate::new(4);
        for i in 0..4 {
            gate.mark_ready(crate::types::Identity::new(i));
        }
        gate
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = GameEngine::new(config(1, 3), SequenceSource::new([0])).err();
        assert!(matches!(err, Some(EngineError::Config(_))));
    }

    #[test]
    fn start_arms_one_drop_timer() {
        let mut engine = GameEngine::new(config(4, 3), SequenceSource::new([0])).unwrap();
        assert_eq!(engine.phase(), Phase::Idle);
        engine.start(&open_gate()).unwrap();
        assert_eq!(engine.phase(), Phase::Falling);
        assert_eq!(engine.timers().count(TimerKind::Drop), 1);

        engine.start(&open_gate()).unwrap();
        assert_eq!(engine.timers().count(TimerKind::Drop), 1);
    }

    #[test]
    fn soft_drop_keeps_a_single_timer() {
        let mut engine = GameEngine::new(config(6, 3), SequenceSource::new([0])).unwrap();
        engine.start(&open_gate()).unwrap();
        for _ in 0..5 {
            engine.soft_drop_start();
            engine.soft_drop_end();
            assert_eq!(engine.timers().len(), 1);
        }
    }

    #[test]
    fn piece_falls_one_row_per_period() {
        let mut engine = GameEngine::new(config(6, 3), SequenceSource::new([0])).unwrap();
        engine.start(&open_gate()).unwrap();
        engine.tick(99);
        assert_eq!(engine.active().unwrap().row, 0);
        engine.tick(1);
        assert_eq!(engine.active().unwrap().row, 1);
        engine.tick(250);
        assert_eq!(engine.active().unwrap().row, 3);
        assert_eq!(engine.now_ms(), 350);
    }

    #[test]
    fn start_rejects_gate_for_other_identity_count() {
        let mut engine = GameEngine::new(config(4, 3), SequenceSource::new([0])).unwrap();
        let mut gate = ReadinessGate::new(1);
        gate.mark_ready(crate::types::Identity::new(0));
        assert!(gate.is_open());
        assert!(matches!(
            engine.start(&gate),
            Err(EngineError::GateMismatch {
                expected: 4,
                found: 1
            })
        ));
        assert!(!engine.started());
    }

    #[test]
    fn moves_rejected_before_start() {
        let mut engine = GameEngine::new(config(4, 3), SequenceSource::new([0])).unwrap();
        assert!(!engine.move_left());
        assert!(!engine.apply_action(GameAction::MoveRight));
    }
}
