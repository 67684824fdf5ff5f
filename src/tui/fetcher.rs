use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::model::{Issue, RepositoryInfo};
use crate::ops::issue_feed::PageRequest;
use crate::remote::{ApiError, RepoApi};

/// Results sent from fetch threads back to the TUI event loop
#[derive(Debug)]
pub enum FetchEvent {
    /// Repository metadata for a detail-screen visit
    Info {
        visit: u64,
        result: Result<RepositoryInfo, ApiError>,
    },
    /// One page of issues
    Page {
        request: PageRequest,
        result: Result<Vec<Issue>, ApiError>,
    },
    /// Existence check for a repository being added to the watchlist
    Lookup {
        input: String,
        result: Result<RepositoryInfo, ApiError>,
    },
}

/// Runs each API call on its own thread. The UI state stays on the main
/// thread; results come back through [`Fetcher::poll`].
pub struct Fetcher {
    api: Arc<dyn RepoApi>,
    tx: mpsc::Sender<FetchEvent>,
    rx: mpsc::Receiver<FetchEvent>,
}

impl Fetcher {
    pub fn new(api: Arc<dyn RepoApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Fetcher { api, tx, rx }
    }

    pub fn repository_info(&self, visit: u64, name: String) {
        self.spawn(move |api| FetchEvent::Info {
            visit,
            result: api.repository(&name),
        });
    }

    pub fn issue_page(&self, request: PageRequest) {
        self.spawn(move |api| {
            let result = api.issues(&request.repo, request.filter, request.page);
            FetchEvent::Page { request, result }
        });
    }

    pub fn lookup(&self, input: String) {
        self.spawn(move |api| {
            let result = api.repository(&input);
            FetchEvent::Lookup { input, result }
        });
    }

    /// Non-blocking poll for finished fetches.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<FetchEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Block until the next event arrives or `timeout` elapses
    pub fn wait(&self, timeout: Duration) -> Option<FetchEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&dyn RepoApi) -> FetchEvent + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("rw-fetch".into())
            .spawn(move || {
                // The receiver is gone only when the app is shutting down
                let _ = tx.send(job(api.as_ref()));
            });
        if let Err(e) = spawned {
            tracing::error!("could not start fetch thread: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IssueFilter;
    use crate::remote::fake::{FakeApi, issues};

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn lookup_reports_back_with_input() {
        let fetcher = Fetcher::new(Arc::new(FakeApi::new().with_repo("a/b", "a/b")));
        fetcher.lookup("a/b".into());
        match fetcher.wait(WAIT) {
            Some(FetchEvent::Lookup { input, result }) => {
                assert_eq!(input, "a/b");
                assert_eq!(result.unwrap().full_name, "a/b");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn page_event_echoes_request() {
        let api = FakeApi::new().with_page("a/b", IssueFilter::Open, 2, issues(1, 3, "open"));
        let fetcher = Fetcher::new(Arc::new(api));
        let request = PageRequest {
            generation: 7,
            repo: "a/b".into(),
            filter: IssueFilter::Open,
            page: 2,
        };
        fetcher.issue_page(request.clone());
        match fetcher.wait(WAIT) {
            Some(FetchEvent::Page { request: echoed, result }) => {
                assert_eq!(echoed, request);
                assert_eq!(result.unwrap().len(), 3);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn info_failure_is_delivered_not_dropped() {
        let fetcher = Fetcher::new(Arc::new(FakeApi::new()));
        fetcher.repository_info(3, "missing/repo".into());
        match fetcher.wait(WAIT) {
            Some(FetchEvent::Info { visit, result }) => {
                assert_eq!(visit, 3);
                assert!(result.unwrap_err().is_not_found());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn poll_is_empty_without_work() {
        let fetcher = Fetcher::new(Arc::new(FakeApi::new()));
        assert!(fetcher.poll().is_empty());
    }
}
