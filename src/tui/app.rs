use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::storage::{FileStorage, Storage};
use crate::io::watchlist::{WatchlistError, WatchlistStore};
use crate::model::{AppConfig, IssueFilter, RepositoryInfo, UiConfig};
use crate::ops::issue_feed::{Applied, FeedStatus, IssueFeed};
use crate::remote::{ApiError, GithubClient, RepoApi};

use super::fetcher::{FetchEvent, Fetcher};
use super::input;
use super::render;
use super::route::Route;
use super::theme::Theme;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Watchlist,
    Repository,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a repository name into the add field
    Input,
}

/// State of the watchlist screen
#[derive(Debug, Clone, Default)]
pub struct WatchlistScreen {
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Contents of the add field
    pub input: String,
    /// Name whose existence check is in flight
    pub pending_add: Option<String>,
    /// Last add failure, shown under the input
    pub error: Option<String>,
}

/// Repository metadata as seen by the detail screen
#[derive(Debug, Clone)]
pub enum InfoState {
    Loading,
    Loaded(RepositoryInfo),
    Failed(String),
}

/// State of one visit to the detail screen
#[derive(Debug)]
pub struct RepositoryScreen {
    pub name: String,
    /// Identifies this visit; metadata responses for other visits are dropped
    pub visit: u64,
    pub info: InfoState,
    pub feed: IssueFeed,
    /// Index into the issue list; `items.len()` selects the "load more" row
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Last issue-page failure
    pub error: Option<String>,
}

impl RepositoryScreen {
    pub fn info(&self) -> Option<&RepositoryInfo> {
        match &self.info {
            InfoState::Loaded(info) => Some(info),
            _ => None,
        }
    }

    /// The filter is disabled once the repository is known to have no open issues
    pub fn filter_enabled(&self) -> bool {
        self.info().is_none_or(|info| info.has_open_issues())
    }

    /// Whether the "load more" row is shown at all
    pub fn shows_load_more(&self) -> bool {
        self.feed.has_more() && self.feed.status() != FeedStatus::LoadingFirstPage
    }

    /// Number of selectable rows (issues plus the "load more" row if shown)
    pub fn row_count(&self) -> usize {
        self.feed.items().len() + usize::from(self.shows_load_more())
    }
}

/// Main application state
pub struct App {
    pub route: Route,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub show_help: bool,
    pub store: WatchlistStore<Box<dyn Storage>>,
    pub watchlist: WatchlistScreen,
    pub repository: Option<RepositoryScreen>,
    pub fetcher: Fetcher,
    /// Advances every event-loop tick; drives the loading spinners
    pub tick: usize,
    next_visit: u64,
}

impl App {
    pub fn new(store: WatchlistStore<Box<dyn Storage>>, api: Arc<dyn RepoApi>, ui: &UiConfig) -> Self {
        App {
            route: Route::Home,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            show_help: false,
            store,
            watchlist: WatchlistScreen::default(),
            repository: None,
            fetcher: Fetcher::new(api),
            tick: 0,
            next_visit: 1,
        }
    }

    pub fn view(&self) -> View {
        match self.route {
            Route::Home => View::Watchlist,
            Route::Repository(_) => View::Repository,
        }
    }

    /// Switch screens. Entering a repository starts its metadata fetch and
    /// the first issue page concurrently.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(path = %route.path(), "navigate");
        self.mode = Mode::Navigate;
        self.show_help = false;
        match &route {
            Route::Home => {
                self.repository = None;
            }
            Route::Repository(name) => {
                let visit = self.next_visit;
                self.next_visit += 1;
                let mut feed = IssueFeed::new(name.clone());
                let request = feed.start();
                self.fetcher.repository_info(visit, name.clone());
                self.fetcher.issue_page(request);
                self.repository = Some(RepositoryScreen {
                    name: name.clone(),
                    visit,
                    info: InfoState::Loading,
                    feed,
                    cursor: 0,
                    scroll_offset: 0,
                    error: None,
                });
            }
        }
        self.route = route;
    }

    // -----------------------------------------------------------------------
    // Watchlist actions
    // -----------------------------------------------------------------------

    /// Submit the add field. Validation and duplicate errors are shown
    /// immediately; otherwise the existence check runs in the background.
    pub fn submit_add(&mut self) {
        if self.watchlist.pending_add.is_some() {
            return;
        }
        match self.store.validate_candidate(&self.watchlist.input) {
            Ok(name) => {
                self.watchlist.error = None;
                self.watchlist.pending_add = Some(name.clone());
                self.fetcher.lookup(name);
            }
            Err(e) => {
                tracing::warn!("add rejected: {}", e);
                self.watchlist.error = Some(e.to_string());
            }
        }
    }

    pub fn selected_repo(&self) -> Option<&str> {
        self.store
            .list()
            .get(self.watchlist.cursor)
            .map(|r| r.name.as_str())
    }

    pub fn open_selected(&mut self) {
        if let Some(name) = self.selected_repo().map(str::to_string) {
            self.navigate(Route::Repository(name));
        }
    }

    /// Remove the repository under the cursor. No confirmation.
    pub fn remove_selected(&mut self) {
        let Some(name) = self.selected_repo().map(str::to_string) else {
            return;
        };
        match self.store.remove(&name) {
            Ok(_) => {
                let len = self.store.len();
                self.watchlist.cursor = self.watchlist.cursor.min(len.saturating_sub(1));
            }
            Err(e) => {
                tracing::warn!(repo = %name, "remove failed: {}", e);
                self.watchlist.error = Some(e.to_string());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Repository actions
    // -----------------------------------------------------------------------

    pub fn set_filter(&mut self, filter: IssueFilter) {
        let Some(screen) = self.repository.as_mut() else {
            return;
        };
        if !screen.filter_enabled() {
            return;
        }
        if let Some(request) = screen.feed.set_filter(filter) {
            screen.cursor = 0;
            screen.scroll_offset = 0;
            screen.error = None;
            self.fetcher.issue_page(request);
        }
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        let Some(current) = self.repository.as_ref().map(|s| s.feed.filter()) else {
            return;
        };
        let next = if forward { current.next() } else { current.prev() };
        self.set_filter(next);
    }

    /// Request the next page; ignored while a fetch is in flight or after a short page
    pub fn load_more(&mut self) {
        let Some(screen) = self.repository.as_mut() else {
            return;
        };
        if let Some(request) = screen.feed.load_more() {
            screen.error = None;
            self.fetcher.issue_page(request);
        }
    }

    // -----------------------------------------------------------------------
    // Fetch results
    // -----------------------------------------------------------------------

    /// Drain finished fetches and advance the spinner
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        for event in self.fetcher.poll() {
            self.handle_fetch_event(event);
        }
    }

    pub fn handle_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Lookup { input, result } => self.finish_add(input, result),
            FetchEvent::Info { visit, result } => {
                let Some(screen) = self.repository.as_mut().filter(|s| s.visit == visit) else {
                    tracing::debug!(visit, "dropping metadata for a previous visit");
                    return;
                };
                screen.info = match result {
                    Ok(info) => InfoState::Loaded(info),
                    Err(e) => {
                        tracing::warn!(repo = %screen.name, "could not load repository: {}", e);
                        if e.is_not_found() {
                            InfoState::Failed("repository not found".into())
                        } else {
                            InfoState::Failed(e.to_string())
                        }
                    }
                };
            }
            FetchEvent::Page { request, result } => {
                let Some(screen) = self.repository.as_mut() else {
                    return;
                };
                match screen.feed.apply(&request, result) {
                    Applied::Stale => {
                        tracing::debug!(
                            filter = %request.filter,
                            page = request.page,
                            "dropping stale issue page"
                        );
                    }
                    Applied::Failed(e) => {
                        tracing::warn!(
                            repo = %request.repo,
                            filter = %request.filter,
                            page = request.page,
                            "could not load issues: {}",
                            e
                        );
                        screen.error = Some(format!("could not load issues: {}", e));
                    }
                    Applied::Replaced(_) | Applied::Appended(_) => {
                        screen.error = None;
                        screen.cursor = screen.cursor.min(screen.row_count().saturating_sub(1));
                    }
                }
            }
        }
    }

    fn finish_add(&mut self, input: String, result: Result<RepositoryInfo, ApiError>) {
        if self.watchlist.pending_add.as_deref() != Some(input.as_str()) {
            return;
        }
        self.watchlist.pending_add = None;

        let outcome = result
            .map_err(|source| WatchlistError::NotFound {
                name: input.clone(),
                source,
            })
            .and_then(|info| self.store.insert(&info.full_name));

        match outcome {
            Ok(_) => {
                self.watchlist.input.clear();
                self.watchlist.error = None;
                self.watchlist.cursor = self.store.len().saturating_sub(1);
                self.mode = Mode::Navigate;
            }
            Err(e) => {
                tracing::warn!(repo = %input, "add failed: {:?}", e);
                self.watchlist.error = Some(e.to_string());
            }
        }
    }
}

/// Run the TUI application starting on `initial`
pub fn run(config: &AppConfig, data_dir: &Path, initial: Route) -> Result<(), Box<dyn std::error::Error>> {
    let storage = FileStorage::open(data_dir);
    tracing::info!(path = %storage.path().display(), "opened watchlist storage");
    let store = WatchlistStore::load(Box::new(storage) as Box<dyn Storage>);
    let api: Arc<dyn RepoApi> = Arc::new(GithubClient::new(&config.api)?);

    let mut app = App::new(store, api, &config.ui);
    app.navigate(initial);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.on_tick();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
