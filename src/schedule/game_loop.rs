use anyhow::Result;
use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::time::Duration;

use super::{Scheduler, interval};
use crate::game::{Direction, GameEngine, GameState, TickOutcome};
use crate::persist::HighScore;

/// Where the loop is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A tick is always pending
    Running,
    /// Focus lost or paused by hand; nothing is pending
    Paused,
    /// Collision or full board; only a restart leaves this state
    GameOver,
}

/// Summary of one fired tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub state: LoopState,
    /// The game ended on this tick with a new best score
    pub new_high_score: bool,
}

/// Owns the game state and drives it one scheduled tick at a time.
///
/// All mutation goes through here: ticks, steering, pause/resume and
/// restart. Within a tick the order is move, collision check, food/score,
/// render, then scheduling the next tick, so ticks never overlap.
pub struct GameLoop<S, R = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    high_score: HighScore,
    scheduler: S,
    loop_state: LoopState,
    last_outcome: Option<TickOutcome>,
    new_high_score: bool,
}

impl<S: Scheduler, R: Rng> GameLoop<S, R> {
    /// Initialize a game and arm its first tick
    pub fn start(mut engine: GameEngine<R>, high_score: HighScore, scheduler: S) -> Self {
        let state = engine.initialize();
        let mut game_loop = Self {
            engine,
            state,
            high_score,
            scheduler,
            loop_state: LoopState::Running,
            last_outcome: None,
            new_high_score: false,
        };

        info!(
            "Game started on a {}x{} board, high score {}",
            game_loop.state.grid.width,
            game_loop.state.grid.height,
            game_loop.high_score.value()
        );
        game_loop.schedule_next();
        game_loop
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.value()
    }

    /// True while game over and the last game beat the previous record
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    /// True while game over because the snake filled the board
    pub fn is_won(&self) -> bool {
        self.loop_state == LoopState::GameOver
            && self.last_outcome == Some(TickOutcome::BoardFilled)
    }

    pub fn last_outcome(&self) -> Option<TickOutcome> {
        self.last_outcome
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Delay the next tick would be scheduled with
    pub fn current_interval(&self) -> Duration {
        interval(self.state.score, &self.engine.config().speed)
    }

    /// Handle a fired tick.
    ///
    /// `render` runs after a tick that did not end the game and before the
    /// next tick is armed. Ticks that fire while not running are stale and
    /// ignored.
    pub fn on_tick<F>(&mut self, render: F) -> Result<TickReport>
    where
        F: FnOnce(&Self) -> Result<()>,
    {
        if self.loop_state != LoopState::Running {
            return Ok(self.report(TickOutcome::Idle));
        }

        let outcome = self.engine.tick(&mut self.state);
        self.last_outcome = Some(outcome);

        match outcome {
            TickOutcome::Collided(_) | TickOutcome::BoardFilled => {
                self.finish(outcome);
            }
            TickOutcome::Ate | TickOutcome::Moved => {
                if outcome == TickOutcome::Ate {
                    debug!(
                        "Food eaten, score {} length {}",
                        self.state.score,
                        self.state.snake.body.len()
                    );
                }
                render(&*self)?;
                self.schedule_next();
            }
            TickOutcome::Idle => {}
        }

        Ok(self.report(outcome))
    }

    /// Buffer a direction for the next tick. Ignored unless running.
    pub fn on_direction(&mut self, direction: Direction) -> bool {
        if self.loop_state != LoopState::Running {
            return false;
        }
        self.engine.steer(&mut self.state, direction)
    }

    /// Running -> Paused, cancelling the pending tick
    pub fn on_focus_lost(&mut self) -> bool {
        if self.loop_state != LoopState::Running {
            return false;
        }

        self.scheduler.cancel_pending();
        self.state.paused = true;
        self.loop_state = LoopState::Paused;
        debug!("Paused at score {}", self.state.score);
        true
    }

    /// Paused -> Running with a freshly computed delay
    pub fn on_focus_gained(&mut self) -> bool {
        if self.loop_state != LoopState::Paused {
            return false;
        }

        self.state.paused = false;
        self.loop_state = LoopState::Running;
        debug!("Resumed at score {}", self.state.score);
        self.schedule_next();
        true
    }

    /// Manual pause key: same transitions as focus changes
    pub fn toggle_pause(&mut self) -> bool {
        match self.loop_state {
            LoopState::Running => self.on_focus_lost(),
            LoopState::Paused => self.on_focus_gained(),
            LoopState::GameOver => false,
        }
    }

    /// Start over from any state
    pub fn restart(&mut self) {
        self.scheduler.cancel_pending();
        self.state = self.engine.initialize();
        self.loop_state = LoopState::Running;
        self.last_outcome = None;
        self.new_high_score = false;
        info!("Game restarted, high score {}", self.high_score.value());
        self.schedule_next();
    }

    fn finish(&mut self, outcome: TickOutcome) {
        self.loop_state = LoopState::GameOver;
        self.new_high_score = self.high_score.record(self.state.score);

        match outcome {
            TickOutcome::BoardFilled => info!("Board filled, final score {}", self.state.score),
            _ => info!(
                "Game over ({:?}), final score {} after {} steps",
                outcome, self.state.score, self.state.steps
            ),
        }
    }

    fn schedule_next(&mut self) {
        let delay = self.current_interval();
        self.scheduler.schedule_tick(delay);
    }

    fn report(&self, outcome: TickOutcome) -> TickReport {
        TickReport {
            outcome,
            state: self.loop_state,
            new_high_score: outcome.is_terminal() && self.new_high_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, GameConfig, Position};
    use crate::persist::{MemoryStore, ScoreStore, StoreError};
    use crate::schedule::ManualScheduler;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::Cell;
    use std::rc::Rc;

    type TestLoop = GameLoop<ManualScheduler, StdRng>;

    fn new_loop() -> TestLoop {
        GameLoop::start(
            GameEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(11)),
            HighScore::load(Box::new(MemoryStore::new())),
            ManualScheduler::new(),
        )
    }

    fn no_render(_: &TestLoop) -> Result<()> {
        Ok(())
    }

    /// Put the food right in front of the head and fire the next tick
    fn feed(game_loop: &mut TestLoop) -> TickReport {
        let head = game_loop.state.snake.head();
        game_loop.state.food = head.moved_in_direction(game_loop.state.direction());
        assert!(game_loop.scheduler_mut().advance_to_next());
        game_loop.on_tick(no_render).unwrap()
    }

    /// Tick straight ahead until the snake dies
    fn crash(game_loop: &mut TestLoop) -> TickReport {
        game_loop.state.food = Position::new(0, 19);
        loop {
            assert!(game_loop.scheduler_mut().advance_to_next());
            let report = game_loop.on_tick(no_render).unwrap();
            if report.state == LoopState::GameOver {
                return report;
            }
        }
    }

    #[test]
    fn test_start_arms_first_tick() {
        let game_loop = new_loop();
        assert_eq!(game_loop.loop_state(), LoopState::Running);
        assert!(game_loop.scheduler().is_pending());
        assert_eq!(
            game_loop.scheduler().requested_delays(),
            &[Duration::from_millis(500)]
        );
    }

    #[test]
    fn test_tick_reschedules_with_score_interval() {
        let mut game_loop = new_loop();

        for expected_score in 1..=3 {
            let report = feed(&mut game_loop);
            assert_eq!(report.outcome, TickOutcome::Ate);
            assert_eq!(game_loop.score(), expected_score);
        }

        let delays: Vec<u64> = game_loop
            .scheduler()
            .requested_delays()
            .iter()
            .map(|d| d.as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![500, 480, 460, 440]);
    }

    #[test]
    fn test_render_runs_before_next_tick_is_armed() {
        let mut game_loop = new_loop();
        let rendered = Rc::new(Cell::new(0));
        let seen = Rc::clone(&rendered);

        game_loop.scheduler_mut().advance_to_next();
        game_loop
            .on_tick(|gl| {
                assert!(!gl.scheduler().is_pending());
                assert_eq!(gl.state().steps, 1);
                seen.set(seen.get() + 1);
                Ok(())
            })
            .unwrap();

        assert_eq!(rendered.get(), 1);
        assert!(game_loop.scheduler().is_pending());
    }

    #[test]
    fn test_render_error_propagates() {
        let mut game_loop = new_loop();
        game_loop.scheduler_mut().advance_to_next();
        let result = game_loop.on_tick(|_| Err(anyhow::anyhow!("surface gone")));
        assert!(result.is_err());
    }

    #[test]
    fn test_game_over_stops_scheduling() {
        let mut game_loop = new_loop();
        let mut rendered = false;

        // Head starts at (10, 10) heading up: ten moves, then the wall
        game_loop.state.food = Position::new(0, 19);
        for _ in 0..10 {
            game_loop.scheduler_mut().advance_to_next();
            game_loop.on_tick(no_render).unwrap();
        }
        game_loop.scheduler_mut().advance_to_next();
        let report = game_loop
            .on_tick(|_| {
                rendered = true;
                Ok(())
            })
            .unwrap();

        assert_eq!(report.outcome, TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(report.state, LoopState::GameOver);
        assert!(!rendered);
        assert!(!game_loop.scheduler().is_pending());
        assert!(game_loop.state().paused);
    }

    #[test]
    fn test_high_score_across_restarts() {
        let mut game_loop = new_loop();

        for _ in 0..5 {
            feed(&mut game_loop);
        }
        let report = crash(&mut game_loop);
        assert!(report.new_high_score);
        assert_eq!(game_loop.high_score(), 5);

        game_loop.restart();
        assert_eq!(game_loop.score(), 0);
        assert_eq!(game_loop.high_score(), 5);
        assert!(!game_loop.is_new_high_score());

        for _ in 0..3 {
            feed(&mut game_loop);
        }
        let report = crash(&mut game_loop);
        assert!(!report.new_high_score);
        assert_eq!(game_loop.score(), 3);
        assert_eq!(game_loop.high_score(), 5);
    }

    #[test]
    fn test_focus_lost_cancels_pending_tick() {
        let mut game_loop = new_loop();

        assert!(game_loop.on_focus_lost());
        assert_eq!(game_loop.loop_state(), LoopState::Paused);
        assert!(!game_loop.scheduler().is_pending());
        assert_eq!(game_loop.scheduler().cancellations(), 1);
        assert!(game_loop.state().paused);

        // Nothing fires however long we wait
        assert!(!game_loop.scheduler_mut().advance(Duration::from_secs(60)));

        // A second blur is a no-op
        assert!(!game_loop.on_focus_lost());
    }

    #[test]
    fn test_focus_gained_schedules_fresh() {
        let mut game_loop = new_loop();
        feed(&mut game_loop);
        game_loop.scheduler_mut().advance(Duration::from_millis(200));
        game_loop.on_focus_lost();
        game_loop.scheduler_mut().advance(Duration::from_secs(30));

        assert!(game_loop.on_focus_gained());
        assert_eq!(game_loop.loop_state(), LoopState::Running);
        let now = game_loop.scheduler().now();
        assert_eq!(
            game_loop.scheduler().deadline(),
            Some(now + Duration::from_millis(480))
        );

        // Already running: no second tick armed
        let requested = game_loop.scheduler().requested_delays().len();
        assert!(!game_loop.on_focus_gained());
        assert_eq!(game_loop.scheduler().requested_delays().len(), requested);
    }

    #[test]
    fn test_stale_tick_ignored() {
        let mut game_loop = new_loop();
        game_loop.on_focus_lost();
        let before = game_loop.state().clone();

        let report = game_loop.on_tick(no_render).unwrap();

        assert_eq!(report.outcome, TickOutcome::Idle);
        assert_eq!(report.state, LoopState::Paused);
        assert_eq!(game_loop.state(), &before);
    }

    #[test]
    fn test_direction_only_while_running() {
        let mut game_loop = new_loop();

        game_loop.on_focus_lost();
        assert!(!game_loop.on_direction(Direction::Left));

        game_loop.on_focus_gained();
        assert!(!game_loop.on_direction(Direction::Down));
        assert!(game_loop.on_direction(Direction::Left));
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = new_loop();
        assert!(game_loop.toggle_pause());
        assert_eq!(game_loop.loop_state(), LoopState::Paused);
        assert!(game_loop.toggle_pause());
        assert_eq!(game_loop.loop_state(), LoopState::Running);

        crash(&mut game_loop);
        assert!(!game_loop.toggle_pause());
        assert!(!game_loop.on_focus_gained());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut game_loop = new_loop();
        crash(&mut game_loop);

        game_loop.restart();

        assert_eq!(game_loop.loop_state(), LoopState::Running);
        assert!(game_loop.state().is_alive);
        assert!(!game_loop.state().paused);
        assert_eq!(game_loop.state().snake.body.len(), 2);
        assert_eq!(game_loop.last_outcome(), None);
        assert_eq!(
            game_loop.scheduler().requested_delays().last(),
            Some(&Duration::from_millis(500))
        );
    }

    #[test]
    fn test_restart_while_running_keeps_single_tick() {
        let mut game_loop = new_loop();
        game_loop.restart();

        assert!(game_loop.scheduler().is_pending());
        assert_eq!(game_loop.scheduler().cancellations(), 1);
    }

    #[test]
    fn test_win_on_full_board() {
        let config = GameConfig::new(2, 2);
        let mut game_loop: TestLoop = GameLoop::start(
            GameEngine::with_rng(config, StdRng::seed_from_u64(5)),
            HighScore::load(Box::new(MemoryStore::new())),
            ManualScheduler::new(),
        );
        // Three cells covered, food on the last one
        game_loop.state.snake.body =
            vec![Position::new(0, 1), Position::new(0, 0), Position::new(1, 0)];
        game_loop.state.snake.direction = Direction::Down;
        game_loop.state.food = Position::new(1, 1);
        assert!(game_loop.on_direction(Direction::Right));

        game_loop.scheduler_mut().advance_to_next();
        let report = game_loop.on_tick(no_render).unwrap();

        assert_eq!(report.outcome, TickOutcome::BoardFilled);
        assert!(game_loop.is_won());
        assert_eq!(game_loop.high_score(), 1);
    }

    struct CountingStore {
        writes: Rc<Cell<usize>>,
    }

    impl ScoreStore for CountingStore {
        fn get_persisted_int(&self, _key: &str) -> Result<Option<i64>, StoreError> {
            Ok(Some(2))
        }

        fn set_persisted_int(&mut self, _key: &str, _value: i64) -> Result<(), StoreError> {
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_high_score_written_only_at_game_over() {
        let writes = Rc::new(Cell::new(0));
        let mut game_loop: TestLoop = GameLoop::start(
            GameEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(9)),
            HighScore::load(Box::new(CountingStore {
                writes: Rc::clone(&writes),
            })),
            ManualScheduler::new(),
        );
        assert_eq!(game_loop.high_score(), 2);

        for _ in 0..4 {
            feed(&mut game_loop);
        }
        assert_eq!(writes.get(), 0);

        crash(&mut game_loop);
        assert_eq!(writes.get(), 1);
        assert_eq!(game_loop.high_score(), 4);
    }
}
