//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering
//! dependencies, so it can be driven by the terminal loop or by tests.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod geometry;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Direction};
pub use collision::{check_collision, detect_collision};
pub use config::{ConfigError, GameConfig, SpeedConfig};
pub use engine::{GameEngine, TickOutcome};
pub use food::{is_board_full, place_food};
pub use geometry::Grid;
pub use state::{CollisionType, GameState, Position, Snake};
