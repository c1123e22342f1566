//! Key mapping from terminal events to game commands.
//!
//! One command per physical key transition: presses map through
//! [`map_key_press`], and the soft-drop key is the only one with a release
//! command. Terminal auto-repeat is passed through on purpose — held movement
//! keys repeat at the terminal's rate.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gridfall_types::Command;

/// Map a key press (or auto-repeat) to a command.
pub fn map_key_press(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::SoftDropPress),
        KeyCode::Up | KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::RotateCw),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::RotateCcw),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Enter => Some(Command::Start),
        _ => None,
    }
}

/// Map a key release to a command. Only the soft-drop key has release
/// semantics.
pub fn map_key_release(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::SoftDropRelease),
        _ => None,
    }
}

/// Whether this key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
