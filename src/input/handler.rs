use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
    None,
}

/// Maps raw terminal keys to engine commands.
///
/// The mapping is the same in every lifecycle state; the engine decides which
/// commands apply.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Self::steer(Direction::Up),
            KeyCode::Down => Self::steer(Direction::Down),
            KeyCode::Left => Self::steer(Direction::Left),
            KeyCode::Right => Self::steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Self::steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Self::steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Self::steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Self::steer(Direction::Right),

            // Lifecycle
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::Command(Command::TogglePause)
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Command(Command::Start)
            }
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::Command(Command::ReturnToMenu),

            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    fn steer(direction: Direction) -> KeyAction {
        KeyAction::Command(Command::SetDirection(direction))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
