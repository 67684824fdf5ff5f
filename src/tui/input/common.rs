use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Uppercase shifted letters so bindings can match on `Char('G')` alone
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

/// Move a list cursor by `delta`, clamped to `[0, len)`
pub(super) fn move_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = cursor as isize + delta;
    target.clamp(0, len as isize - 1) as usize
}
