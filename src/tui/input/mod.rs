mod common;
mod edit;
mod repository;
mod watchlist;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, View};

use common::normalize_key;
use edit::handle_edit;
use repository::handle_repository;
use watchlist::handle_watchlist;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);

    // Ctrl+C always quits, even while typing
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Input => handle_edit(app, key),
        Mode::Navigate => match app.view() {
            View::Watchlist => handle_watchlist(app, key),
            View::Repository => handle_repository(app, key),
        },
    }
}
