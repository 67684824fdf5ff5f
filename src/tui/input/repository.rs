use crossterm::event::{KeyCode, KeyEvent};

use crate::model::IssueFilter;
use crate::tui::app::{App, InfoState};
use crate::tui::route::Route;

use super::common::move_cursor;

/// Keys on the repository detail screen
pub(super) fn handle_repository(app: &mut App, key: KeyEvent) {
    let Some(screen) = app.repository.as_mut() else {
        return;
    };

    // Back and quit work while the summary is still loading
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
            app.navigate(Route::Home);
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }
    if matches!(screen.info, InfoState::Loading) {
        return;
    }

    let rows = screen.row_count();
    match key.code {
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => screen.cursor = move_cursor(screen.cursor, 1, rows),
        KeyCode::Char('k') | KeyCode::Up => screen.cursor = move_cursor(screen.cursor, -1, rows),
        KeyCode::Char('g') | KeyCode::Home => screen.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => screen.cursor = rows.saturating_sub(1),
        KeyCode::Char('1') => app.set_filter(IssueFilter::All),
        KeyCode::Char('2') => app.set_filter(IssueFilter::Open),
        KeyCode::Char('3') => app.set_filter(IssueFilter::Closed),
        KeyCode::Char('f') | KeyCode::Tab => app.cycle_filter(true),
        KeyCode::Char('F') | KeyCode::BackTab => app.cycle_filter(false),
        KeyCode::Char('m') => app.load_more(),
        KeyCode::Enter if screen.cursor >= screen.feed.items().len() => app.load_more(),
        _ => {}
    }
}
