use anyhow::{Context, Result};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine};
use crate::input::{InputEvent, InputHandler};
use crate::metrics::GameMetrics;
use crate::persist::{HighScore, ScoreStore};
use crate::render::{GameView, Renderer};
use crate::schedule::{GameLoop, LoopState, TokioScheduler};

/// Header clock refresh; the board itself redraws on ticks and input
const CLOCK_REFRESH: Duration = Duration::from_millis(250);

pub struct HumanMode {
    game_loop: GameLoop<TokioScheduler>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>) -> Self {
        let game_loop = GameLoop::start(
            GameEngine::new(config),
            HighScore::load(store),
            TokioScheduler::new(),
        );

        Self {
            game_loop,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableFocusChange)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Session ended after {} games, high score {}",
            self.metrics.games_played,
            self.game_loop.high_score()
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut clock_timer = interval(CLOCK_REFRESH);

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            self.handle_event(&event);
                            self.draw(terminal)?;
                        }
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = self.game_loop.scheduler_mut().fired() => {
                    self.update_game(terminal)?;
                }

                // Keep the header clock moving
                _ = clock_timer.tick() => {
                    self.metrics.update();
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        match self.input_handler.handle_event(event) {
            InputEvent::Steer(direction) => {
                self.game_loop.on_direction(direction);
            }
            InputEvent::FocusLost => self.pause(),
            InputEvent::FocusGained => self.resume(),
            InputEvent::TogglePause => match self.game_loop.loop_state() {
                LoopState::Running => self.pause(),
                LoopState::Paused => self.resume(),
                LoopState::GameOver => {}
            },
            InputEvent::Restart => self.reset_game(),
            InputEvent::Quit => self.should_quit = true,
            InputEvent::None => {}
        }
    }

    fn pause(&mut self) {
        if self.game_loop.on_focus_lost() {
            self.metrics.on_pause();
        }
    }

    fn resume(&mut self) {
        if self.game_loop.on_focus_gained() {
            self.metrics.on_resume();
        }
    }

    fn update_game<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let renderer = &self.renderer;
        let metrics = &self.metrics;
        let report = self
            .game_loop
            .on_tick(|game_loop| draw_frame(terminal, renderer, game_loop, metrics))?;

        // Track game over
        if report.outcome.is_terminal() {
            self.metrics.on_game_over();
            self.draw(terminal)?;
        }

        Ok(())
    }

    fn reset_game(&mut self) {
        self.game_loop.restart();
        self.metrics.on_game_start();
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        draw_frame(terminal, &self.renderer, &self.game_loop, &self.metrics)
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableFocusChange,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn draw_frame<B: Backend>(
    terminal: &mut Terminal<B>,
    renderer: &Renderer,
    game_loop: &GameLoop<TokioScheduler>,
    metrics: &GameMetrics,
) -> Result<()> {
    terminal
        .draw(|frame| renderer.render(frame, &GameView::new(game_loop, metrics)))
        .context("Failed to draw frame")?;
    Ok(())
}
