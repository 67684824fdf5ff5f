use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::common::move_cursor;

/// Keys on the watchlist screen in navigate mode
pub(super) fn handle_watchlist(app: &mut App, key: KeyEvent) {
    let len = app.store.len();
    let cursor = &mut app.watchlist.cursor;
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => *cursor = move_cursor(*cursor, 1, len),
        KeyCode::Char('k') | KeyCode::Up => *cursor = move_cursor(*cursor, -1, len),
        KeyCode::Char('g') | KeyCode::Home => *cursor = 0,
        KeyCode::Char('G') | KeyCode::End => *cursor = len.saturating_sub(1),
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Char('/') => app.mode = Mode::Input,
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.open_selected(),
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => app.remove_selected(),
        _ => {}
    }
}
