//! Grid Snake - a terminal snake game with a persisted high score
//!
//! This library provides:
//! - Core game logic (game module)
//! - Score-paced tick scheduling with pause/resume (schedule module)
//! - High-score storage (persist module)
//! - Canvas rendering and the HUD (render module)
//! - Keyboard and focus handling (input module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persist;
pub mod render;
pub mod schedule;
