use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

/// What a terminal event means to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Steer(Direction),
    FocusLost,
    FocusGained,
    TogglePause,
    Restart,
    Quit,
    /// Anything else; dropped silently
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_event(&self, event: &Event) -> InputEvent {
        match event {
            // Only key presses, not repeats or releases
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(*key),
            Event::FocusLost => InputEvent::FocusLost,
            Event::FocusGained => InputEvent::FocusGained,
            _ => InputEvent::None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputEvent {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputEvent::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputEvent::Steer(Direction::Up),
            KeyCode::Down => InputEvent::Steer(Direction::Down),
            KeyCode::Left => InputEvent::Steer(Direction::Left),
            KeyCode::Right => InputEvent::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputEvent::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputEvent::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputEvent::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputEvent::Steer(Direction::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                InputEvent::TogglePause
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Restart,

            _ => InputEvent::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
