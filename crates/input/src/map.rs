//! Key mapping from terminal events to commands.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// In-game command produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Move the board cursor one cell
    Move(Direction),
    /// Tap the cell under the cursor
    Tap,
    /// Forward an action to the game state as-is
    Action(GameAction),
}

/// Command produced by a key press on the level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    SelectLevel(usize),
    NextTheme,
    Start,
}

/// Map keyboard input to in-game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(InputCommand::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(InputCommand::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(InputCommand::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(InputCommand::Move(Direction::Down))
        }
        KeyCode::Char(' ') | KeyCode::Enter => Some(InputCommand::Tap),

        // Assistance
        KeyCode::Char('?') | KeyCode::Char('i') | KeyCode::Char('I') => {
            Some(InputCommand::Action(GameAction::Hint))
        }
        KeyCode::Char('x') | KeyCode::Char('X') => Some(InputCommand::Action(GameAction::Shuffle)),

        // Run control
        KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(InputCommand::Action(GameAction::TogglePause))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputCommand::Action(GameAction::Restart)),
        KeyCode::Char('n') | KeyCode::Char('N') => {
            Some(InputCommand::Action(GameAction::NextLevel))
        }
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => {
            Some(InputCommand::Action(GameAction::Menu))
        }

        _ => None,
    }
}

/// Map keyboard input on the level menu.
pub fn handle_menu_key(key: KeyEvent) -> Option<MenuCommand> {
    match key.code {
        KeyCode::Char(c @ '1'..='9') => Some(MenuCommand::SelectLevel(c as usize - '1' as usize)),
        KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Tab => Some(MenuCommand::NextTheme),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuCommand::Start),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
