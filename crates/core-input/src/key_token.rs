use core_events::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Map a crossterm key event into an engine `KeyEvent`.
///
/// Returns `None` for releases and for keys the engine has no use for (function
/// keys, media keys, lone modifiers).
pub fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    let mut mods = map_mods(event.modifiers);
    if matches!(event.code, CKeyCode::BackTab) {
        mods |= KeyModifiers::SHIFT;
    }
    let Some(code) = map_key_code(&event.code) else {
        tracing::trace!(target: "input.key", code=?event.code, "unmapped_key");
        return None;
    };
    Some(KeyEvent::new(code, mods))
}

/// Convert a crossterm key code into an engine key code.
pub fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let code = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        _ => return None,
    };
    Some(code)
}

/// Convert crossterm modifier flags into engine modifier bits. Super and
/// Meta have no engine meaning and are dropped.
pub fn map_mods(m: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState as CKeyEventState;

    fn key_event(code: CKeyCode, modifiers: CKeyModifiers, kind: CKeyEventKind) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers,
            kind,
            state: CKeyEventState::empty(),
        }
    }

    #[test]
    fn maps_basic_char() {
        let ev = key_event(
            CKeyCode::Char('a'),
            CKeyModifiers::NONE,
            CKeyEventKind::Press,
        );
        assert_eq!(map_key_event(&ev), Some(KeyEvent::char('a')));
    }

    #[test]
    fn maps_named_key() {
        let ev = key_event(CKeyCode::Enter, CKeyModifiers::NONE, CKeyEventKind::Press);
        assert_eq!(map_key_event(&ev), Some(KeyEvent::plain(KeyCode::Enter)));
    }

    #[test]
    fn maps_modifiers() {
        let ev = key_event(
            CKeyCode::Char('r'),
            CKeyModifiers::CONTROL | CKeyModifiers::SHIFT,
            CKeyEventKind::Press,
        );
        let key = map_key_event(&ev).expect("ctrl-shift-r should map");
        assert_eq!(key.code, KeyCode::Char('r'));
        assert!(key.mods.contains(KeyModifiers::CTRL));
        assert!(key.mods.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn back_tab_is_shift_tab() {
        let ev = key_event(CKeyCode::BackTab, CKeyModifiers::NONE, CKeyEventKind::Press);
        assert_eq!(
            map_key_event(&ev),
            Some(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT))
        );
    }

    #[test]
    fn repeats_map_and_releases_do_not() {
        let repeat = key_event(
            CKeyCode::Char('j'),
            CKeyModifiers::NONE,
            CKeyEventKind::Repeat,
        );
        assert_eq!(map_key_event(&repeat), Some(KeyEvent::char('j')));
        let release = key_event(
            CKeyCode::Char('j'),
            CKeyModifiers::NONE,
            CKeyEventKind::Release,
        );
        assert!(map_key_event(&release).is_none());
    }

    #[test]
    fn unsupported_keys_return_none() {
        for code in [CKeyCode::CapsLock, CKeyCode::F(5), CKeyCode::PageUp] {
            let ev = key_event(code, CKeyModifiers::NONE, CKeyEventKind::Press);
            assert!(map_key_event(&ev).is_none(), "{code:?}");
        }
    }
}
