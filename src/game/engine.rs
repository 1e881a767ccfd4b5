use super::{
    action::Direction,
    collision::detect_collision,
    config::GameConfig,
    food::place_food,
    state::{CollisionType, GameState, Snake},
};
use rand::Rng;
use rand::rngs::ThreadRng;

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snake advanced one cell without growing
    Moved,
    /// Snake ate the food and grew by one segment
    Ate,
    /// The new head hit a wall or the body; the game is over
    Collided(CollisionType),
    /// The snake ate the last free cell; the game is won
    BoardFilled,
    /// Game was paused or already over, nothing changed
    Idle,
}

impl TickOutcome {
    /// True if this tick ended the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Collided(_) | TickOutcome::BoardFilled)
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine with a specific random source, e.g. a seeded one
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: a vertical snake in the middle of the board heading up,
    /// score 0, food placed off the snake.
    pub fn initialize(&mut self) -> GameState {
        let grid = self.config.grid();
        let snake = Snake::new(
            grid.center(),
            Direction::Up,
            self.config.initial_snake_length,
        );

        // A validated config always leaves free cells at start
        let food = place_food(&mut self.rng, &snake.body, &grid).unwrap_or(snake.head());

        GameState::new(snake, food, grid)
    }

    /// Advance the game by one cell.
    ///
    /// Order is fixed: apply the pending direction, prepend the new head,
    /// check collisions, then either eat or drop the tail.
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_alive || state.paused {
            return TickOutcome::Idle;
        }

        if let Some(direction) = state.pending_direction.take() {
            if direction.is_turn_from(state.snake.direction) {
                state.snake.direction = direction;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.snake.push_head(new_head);
        state.steps += 1;

        if let Some(collision) = detect_collision(&state.snake.body, &state.grid) {
            state.is_alive = false;
            state.paused = true;
            return TickOutcome::Collided(collision);
        }

        if new_head == state.food {
            state.score += 1;
            match place_food(&mut self.rng, &state.snake.body, &state.grid) {
                Some(food) => {
                    state.food = food;
                    TickOutcome::Ate
                }
                None => {
                    state.is_alive = false;
                    state.paused = true;
                    TickOutcome::BoardFilled
                }
            }
        } else {
            state.snake.pop_tail();
            TickOutcome::Moved
        }
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Only turns onto the other axis relative to the direction applied on
    /// the last tick are accepted, so a reversal can never sneak in through
    /// two quick presses. The latest accepted request wins.
    pub fn steer(&self, state: &mut GameState, requested: Direction) -> bool {
        if !state.is_alive {
            return false;
        }

        if requested.is_turn_from(state.snake.direction) {
            state.pending_direction = Some(requested);
            true
        } else {
            false
        }
    }
}
