//! Key bindings for the editor screen.

use crate::core::buffer::TAB_INDENT;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PAGE: u16 = 10;

/// Everything a key press, paste or click can ask the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Submit,
    Quit,
    ClearInput,
    Insert(char),
    InsertText(String),
    Newline,
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    ScrollReviewUp(u16),
    ScrollReviewDown(u16),
}

/// Control held without Alt. Windows reports AltGr as Control+Alt, and
/// AltGr chords type characters such as `{` or `@` on many layouts.
fn is_control_chord(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

/// Ctrl+Enter, Cmd/Super+Enter, or Ctrl+R for terminals that report a
/// modified Enter as plain Enter.
pub fn is_submit_chord(key: &KeyEvent) -> bool {
    let submit_modifiers = KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META;
    match key.code {
        KeyCode::Enter => key.modifiers.intersects(submit_modifiers),
        KeyCode::Char('r') | KeyCode::Char('R') => is_control_chord(key),
        _ => false,
    }
}

/// Maps a key event to an action. The submit chord is consumed here, so it
/// never reaches the editor as a newline.
pub fn dispatch(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if is_submit_chord(&key) {
        return Some(Action::Submit);
    }

    let ctrl = is_control_chord(&key);
    let action = match key.code {
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('l') if ctrl => Action::ClearInput,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Action::Insert(c),
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::Newline,
        KeyCode::Tab => Action::InsertText(TAB_INDENT.to_string()),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Up => Action::CursorUp,
        KeyCode::Down => Action::CursorDown,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::PageUp => Action::ScrollReviewUp(PAGE),
        KeyCode::PageDown => Action::ScrollReviewDown(PAGE),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_submit_chords() {
        assert_eq!(
            dispatch(key(KeyCode::Enter, KeyModifiers::CONTROL)),
            Some(Action::Submit)
        );
        assert_eq!(
            dispatch(key(KeyCode::Enter, KeyModifiers::SUPER)),
            Some(Action::Submit)
        );
        assert_eq!(
            dispatch(key(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
            Some(Action::Submit)
        );
        assert_eq!(
            dispatch(key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Action::Submit)
        );
    }

    #[test]
    fn test_plain_enter_is_newline() {
        assert_eq!(
            dispatch(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Newline)
        );
        assert_eq!(
            dispatch(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(Action::Newline)
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(dispatch(release), None);
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(
            dispatch(key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Action::Insert('r'))
        );
        assert_eq!(
            dispatch(key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(Action::Insert('R'))
        );
        assert_eq!(
            dispatch(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::InsertText("    ".to_string()))
        );
        assert_eq!(dispatch(key(KeyCode::Char('z'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_altgr_characters_are_typed() {
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        for c in ['{', '}', '[', ']', '\\', '@', '|', 'r', 'c'] {
            assert_eq!(
                dispatch(key(KeyCode::Char(c), altgr)),
                Some(Action::Insert(c)),
                "AltGr+{} should type the character",
                c
            );
        }
    }

    #[test]
    fn test_quit_and_clear() {
        assert_eq!(
            dispatch(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(dispatch(key(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(
            dispatch(key(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Some(Action::ClearInput)
        );
    }
}
