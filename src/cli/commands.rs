use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::IssueFilter;

#[derive(Parser)]
#[command(name = "rw", about = concat!("repowatch v", env!("CARGO_PKG_VERSION"), " - keep an eye on your repositories"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding storage.json and the TUI log
    #[arg(long = "data-dir", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the hosting API
    #[arg(long = "api-url", global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the TUI on a repository's detail screen
    Open(OpenArgs),
    /// List tracked repositories
    List,
    /// Look a repository up and add it to the watchlist
    Add(RepoArgs),
    /// Remove a repository from the watchlist
    Rm(RepoArgs),
    /// Show repository metadata
    Info(RepoArgs),
    /// Show one page of a repository's issues
    Issues(IssuesArgs),
}

#[derive(Args)]
pub struct OpenArgs {
    /// Repository name (owner/name) or a screen path such as /repositorio/owner%2Fname
    pub target: String,
}

#[derive(Args)]
pub struct RepoArgs {
    /// Repository name (owner/name)
    pub name: String,
}

#[derive(Args)]
pub struct IssuesArgs {
    /// Repository name (owner/name)
    pub name: String,
    /// Issue state: all, open or closed
    #[arg(long, default_value = "all")]
    pub state: IssueFilter,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}
