use std::sync::Arc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::{MemoryStorage, Storage};
use crate::io::watchlist::WatchlistStore;
use crate::model::{IssueFilter, UiConfig};
use crate::remote::fake::{FakeApi, issues};
use crate::tui::app::App;
use crate::tui::route::Route;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the default test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| crate::tui::render::render(frame, app))
}

/// Build an App whose watchlist holds `repos`, backed by memory storage.
pub fn app_with_repos(api: FakeApi, repos: &[&str]) -> App {
    let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
    let mut store = WatchlistStore::load(storage);
    for name in repos {
        store.insert(name).unwrap();
    }
    App::new(store, Arc::new(api), &UiConfig::default())
}

/// Apply `n` fetch results in arrival order
pub fn settle(app: &mut App, n: usize) {
    for _ in 0..n {
        let event = app
            .fetcher
            .wait(Duration::from_secs(5))
            .expect("fetch event");
        app.handle_fetch_event(event);
    }
}

/// An App on the detail screen of `facebook/react` with metadata and a full
/// first page of issues loaded.
pub fn app_on_repository() -> App {
    let api = FakeApi::new()
        .with_repo("facebook/react", "facebook/react")
        .with_page("facebook/react", IssueFilter::All, 1, issues(1, 5, "Bug"));
    let mut app = app_with_repos(api, &["facebook/react"]);
    app.navigate(Route::Repository("facebook/react".into()));
    settle(&mut app, 2);
    app
}
