use crate::io::storage::{Storage, StorageError};
use crate::model::TrackedRepository;
use crate::remote::{ApiError, RepoApi};

/// Storage key holding the watchlist as a JSON array of `{"name": ...}`
pub const STORAGE_KEY: &str = "@app_repos";

/// Why a watchlist mutation was refused
#[derive(Debug, thiserror::Error)]
pub enum WatchlistError {
    #[error("repository required")]
    Validation,
    #[error("repository already tracked: {0}")]
    Duplicate(String),
    #[error("repository not found: {name}")]
    NotFound {
        name: String,
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The user's watchlist. Loaded from storage on construction; every
/// mutation rewrites the whole list under [`STORAGE_KEY`].
#[derive(Debug)]
pub struct WatchlistStore<S: Storage> {
    storage: S,
    repos: Vec<TrackedRepository>,
}

impl<S: Storage> WatchlistStore<S> {
    /// Rehydrate from storage. Absent or unparseable data is an empty list.
    pub fn load(storage: S) -> Self {
        let repos = match storage.get_item(STORAGE_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<TrackedRepository>>(&raw) {
                Ok(repos) => repos,
                Err(e) => {
                    tracing::warn!("ignoring unreadable watchlist in storage: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        WatchlistStore { storage, repos }
    }

    /// Tracked repositories in insertion order
    pub fn list(&self) -> &[TrackedRepository] {
        &self.repos
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.repos.iter().any(|r| r.name == name)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Check user input before any remote lookup. Returns the trimmed name.
    pub fn validate_candidate(&self, input: &str) -> Result<String, WatchlistError> {
        let name = input.trim();
        if name.is_empty() {
            return Err(WatchlistError::Validation);
        }
        if self.contains(name) {
            return Err(WatchlistError::Duplicate(name.to_string()));
        }
        Ok(name.to_string())
    }

    /// Validate, look the repository up remotely, then append its canonical
    /// name. Nothing is mutated unless every step succeeds.
    pub fn add(&mut self, input: &str, api: &dyn RepoApi) -> Result<TrackedRepository, WatchlistError> {
        let name = self.validate_candidate(input)?;
        let info = api
            .repository(&name)
            .map_err(|source| WatchlistError::NotFound {
                name: name.clone(),
                source,
            })?;
        self.insert(&info.full_name)
    }

    /// Append an already-confirmed canonical name and persist.
    /// The canonical name may differ from what was typed, so duplicates are
    /// checked again here.
    pub fn insert(&mut self, full_name: &str) -> Result<TrackedRepository, WatchlistError> {
        if self.contains(full_name) {
            return Err(WatchlistError::Duplicate(full_name.to_string()));
        }
        let repo = TrackedRepository::new(full_name);
        self.repos.push(repo.clone());
        if let Err(e) = self.persist() {
            self.repos.pop();
            return Err(e);
        }
        tracing::info!(repo = %repo.name, "added to watchlist");
        Ok(repo)
    }

    /// Remove every entry named exactly `name`. Returns how many were removed;
    /// an absent name is a no-op and does not touch storage.
    pub fn remove(&mut self, name: &str) -> Result<usize, WatchlistError> {
        let before = self.repos.clone();
        self.repos.retain(|r| r.name != name);
        let removed = before.len() - self.repos.len();
        if removed == 0 {
            return Ok(0);
        }
        if let Err(e) = self.persist() {
            self.repos = before;
            return Err(e);
        }
        tracing::info!(repo = %name, "removed from watchlist");
        Ok(removed)
    }

    fn persist(&mut self) -> Result<(), WatchlistError> {
        let raw = serde_json::to_string(&self.repos).map_err(StorageError::from)?;
        self.storage.set_item(STORAGE_KEY, &raw)?;
        Ok(())
    }
}
