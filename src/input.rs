//! Discrete player commands
//!
//! The host forwards keyboard and on-screen button presses as commands.
//! They are applied immediately; nothing is queued between ticks.

use serde::{Deserialize, Serialize};

/// A player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveUp,
    MoveDown,
    /// Start a new run (only honoured after game over)
    Restart,
}

/// On-screen buttons for touch devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Restart,
}

impl From<Button> for Command {
    fn from(button: Button) -> Self {
        match button {
            Button::Up => Command::MoveUp,
            Button::Down => Command::MoveDown,
            Button::Restart => Command::Restart,
        }
    }
}

/// Map a DOM-style key name to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowUp" => Some(Command::MoveUp),
        "ArrowDown" => Some(Command::MoveDown),
        "Enter" => Some(Command::Restart),
        _ => None,
    }
}
