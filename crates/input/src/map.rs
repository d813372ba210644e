//! Key mapping from terminal events to game actions and menu commands.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Navigation input for menu scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Up,
    Down,
    Select,
    Back,
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => {
            Some(GameAction::RotateCw)
        }
        KeyCode::Char('z' | 'Z' | 'y' | 'Y') => Some(GameAction::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p' | 'P') => Some(GameAction::Pause),
        KeyCode::Char('r' | 'R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Map keyboard input to menu navigation.
pub fn menu_command(key: KeyEvent) -> Option<MenuCommand> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(MenuCommand::Up),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(MenuCommand::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuCommand::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(MenuCommand::Back),
        _ => None,
    }
}

/// Leave the current game and go back to the menu.
pub fn is_back_to_menu(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::SoftDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('H'))),
            Some(GameAction::MoveLeft)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('x'))),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('z'))),
            Some(GameAction::RotateCcw)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(GameAction::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(GameAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(menu_command(KeyEvent::from(KeyCode::Up)), Some(MenuCommand::Up));
        assert_eq!(menu_command(KeyEvent::from(KeyCode::Char('j'))), Some(MenuCommand::Down));
        assert_eq!(menu_command(KeyEvent::from(KeyCode::Enter)), Some(MenuCommand::Select));
        assert_eq!(menu_command(KeyEvent::from(KeyCode::Esc)), Some(MenuCommand::Back));
        assert_eq!(menu_command(KeyEvent::from(KeyCode::Char('p'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(is_back_to_menu(KeyEvent::from(KeyCode::Esc)));
    }
}
