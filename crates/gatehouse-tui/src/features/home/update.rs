use crossterm::event::{KeyCode, KeyEvent};

use crate::effects::UiEffect;

/// Handles a key press on the home screen.
///
/// `l` logs out with or without Ctrl held.
pub fn handle_home_key(key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('l' | 'L') => vec![UiEffect::Logout],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_l_logs_out() {
        assert_eq!(
            handle_home_key(key(KeyCode::Char('l'), KeyModifiers::NONE)),
            vec![UiEffect::Logout]
        );
        assert_eq!(
            handle_home_key(key(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            vec![UiEffect::Logout]
        );
    }

    #[test]
    fn test_other_keys_do_nothing() {
        assert!(handle_home_key(key(KeyCode::Char('x'), KeyModifiers::NONE)).is_empty());
        assert!(handle_home_key(key(KeyCode::Enter, KeyModifiers::NONE)).is_empty());
    }
}
