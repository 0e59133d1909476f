use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// User intent decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    NextSection,
    PrevSection,
    StartScan,
    ResetScan,
}

/// Map a key press to an action
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('d') if ctrl => Some(Action::HalfPageDown),
        KeyCode::Char('u') if ctrl => Some(Action::HalfPageUp),
        KeyCode::Char('f') if ctrl => Some(Action::PageDown),
        KeyCode::Char('b') if ctrl => Some(Action::PageUp),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Char('d') => Some(Action::HalfPageDown),
        KeyCode::Char('u') => Some(Action::HalfPageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Char('n') | KeyCode::Tab => Some(Action::NextSection),
        KeyCode::Char('N') | KeyCode::BackTab => Some(Action::PrevSection),
        KeyCode::Char('s') | KeyCode::Enter => Some(Action::StartScan),
        KeyCode::Char('r') => Some(Action::ResetScan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vim_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(handle_key_event(key(KeyCode::Char('G'))), Some(Action::Bottom));
        assert_eq!(handle_key_event(key(KeyCode::Char('s'))), Some(Action::StartScan));
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_keys() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_d), Some(Action::HalfPageDown));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), Some(Action::Quit));
    }
}
