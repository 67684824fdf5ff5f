use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Keys while typing into the add field
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_add(),
        // Leave the field but keep its contents
        KeyCode::Esc => app.mode = Mode::Navigate,
        // A lookup in flight owns the current text
        _ if app.watchlist.pending_add.is_some() => {}
        KeyCode::Backspace => {
            unicode::pop_grapheme(&mut app.watchlist.input);
            app.watchlist.error = None;
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.watchlist.input.clear();
            app.watchlist.error = None;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.watchlist.input.push(c);
            app.watchlist.error = None;
        }
        _ => {}
    }
}
