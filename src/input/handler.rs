use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, SerpentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(SerpentId, Direction),
    Quit,
    None,
}

/// Shared keyboard layout: WASD for serpent 1, IJKL or arrows for serpent 2
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
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Steer(SerpentId::One, Direction::Up),
                's' => KeyAction::Steer(SerpentId::One, Direction::Down),
                'a' => KeyAction::Steer(SerpentId::One, Direction::Left),
                'd' => KeyAction::Steer(SerpentId::One, Direction::Right),

                'i' => KeyAction::Steer(SerpentId::Two, Direction::Up),
                'k' => KeyAction::Steer(SerpentId::Two, Direction::Down),
                'j' => KeyAction::Steer(SerpentId::Two, Direction::Left),
                'l' => KeyAction::Steer(SerpentId::Two, Direction::Right),

                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },

            KeyCode::Up => KeyAction::Steer(SerpentId::Two, Direction::Up),
            KeyCode::Down => KeyAction::Steer(SerpentId::Two, Direction::Down),
            KeyCode::Left => KeyAction::Steer(SerpentId::Two, Direction::Left),
            KeyCode::Right => KeyAction::Steer(SerpentId::Two, Direction::Right),

            KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_wasd_steers_serpent_one() {
        assert_eq!(
            press(KeyCode::Char('w')),
            KeyAction::Steer(SerpentId::One, Direction::Up)
        );
        assert_eq!(
            press(KeyCode::Char('a')),
            KeyAction::Steer(SerpentId::One, Direction::Left)
        );
        assert_eq!(
            press(KeyCode::Char('s')),
            KeyAction::Steer(SerpentId::One, Direction::Down)
        );
        assert_eq!(
            press(KeyCode::Char('d')),
            KeyAction::Steer(SerpentId::One, Direction::Right)
        );
    }

    #[test]
    fn test_ijkl_steers_serpent_two() {
        assert_eq!(
            press(KeyCode::Char('i')),
            KeyAction::Steer(SerpentId::Two, Direction::Up)
        );
        assert_eq!(
            press(KeyCode::Char('j')),
            KeyAction::Steer(SerpentId::Two, Direction::Left)
        );
        assert_eq!(
            press(KeyCode::Char('k')),
            KeyAction::Steer(SerpentId::Two, Direction::Down)
        );
        assert_eq!(
            press(KeyCode::Char('l')),
            KeyAction::Steer(SerpentId::Two, Direction::Right)
        );
    }

    #[test]
    fn test_arrow_keys_steer_serpent_two() {
        assert_eq!(
            press(KeyCode::Up),
            KeyAction::Steer(SerpentId::Two, Direction::Up)
        );
        assert_eq!(
            press(KeyCode::Right),
            KeyAction::Steer(SerpentId::Two, Direction::Right)
        );
    }

    #[test]
    fn test_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Steer(SerpentId::One, Direction::Up)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }
}
