use std::string::FromUtf8Error;

/// Path prefix of the repository detail screen
const REPOSITORY_PREFIX: &str = "/repositorio/";

/// Navigable screens, addressed by browser-style paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: the watchlist
    Home,
    /// `/repositorio/{urlEncodedRepoName}`: one repository's summary and issues
    Repository(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("no screen matches {0}")]
    Unknown(String),
    #[error("invalid percent-encoding in {path}: {source}")]
    Encoding {
        path: String,
        source: FromUtf8Error,
    },
}

impl Route {
    /// Path for this route; the repository name is encoded as a single segment
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Repository(name) => {
                format!("{}{}", REPOSITORY_PREFIX, urlencoding::encode(name))
            }
        }
    }

    pub fn parse(path: &str) -> Result<Route, RouteError> {
        if path.is_empty() || path == "/" {
            return Ok(Route::Home);
        }
        let segment = path
            .strip_prefix(REPOSITORY_PREFIX)
            .filter(|s| !s.is_empty() && !s.contains('/'))
            .ok_or_else(|| RouteError::Unknown(path.to_string()))?;
        let name = urlencoding::decode(segment).map_err(|e| RouteError::Encoding {
            path: path.to_string(),
            source: e,
        })?;
        Ok(Route::Repository(name.into_owned()))
    }
}
