use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::storage::FileStorage;
use crate::io::watchlist::WatchlistStore;
use crate::model::{AppConfig, ISSUES_PER_PAGE};
use crate::remote::{GithubClient, RepoApi};
use crate::tui::route::{Route, RouteError};

/// Resolved configuration for one invocation: the config file with the
/// global flags applied on top
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,
    pub data_dir: PathBuf,
}

pub fn load_context(cli: &Cli) -> Result<Context, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config_io::read_config_from(path)?,
        None => config_io::read_config()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.storage.dir = Some(dir.clone());
    }
    let data_dir = config_io::data_dir(&config);
    Ok(Context { config, data_dir })
}

/// Screen to start the TUI on: `rw` opens the watchlist, `rw open` a repository
pub fn initial_route(command: Option<&Commands>) -> Result<Route, RouteError> {
    match command {
        Some(Commands::Open(args)) if args.target.starts_with('/') => Route::parse(&args.target),
        Some(Commands::Open(args)) => Ok(Route::Repository(args.target.trim().to_string())),
        _ => Ok(Route::Home),
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    match cli.command {
        Some(Commands::List) => cmd_list(ctx, json),
        Some(Commands::Add(args)) => cmd_add(ctx, args),
        Some(Commands::Rm(args)) => cmd_rm(ctx, args),
        Some(Commands::Info(args)) => cmd_info(ctx, args, json),
        Some(Commands::Issues(args)) => cmd_issues(ctx, args, json),
        // The TUI is launched from main
        None | Some(Commands::Open(_)) => Err("no subcommand to run".into()),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_store(ctx: &Context) -> WatchlistStore<FileStorage> {
    WatchlistStore::load(FileStorage::open(&ctx.data_dir))
}

fn client(ctx: &Context) -> Result<GithubClient, Box<dyn std::error::Error>> {
    Ok(GithubClient::new(&ctx.config.api)?)
}

// ---------------------------------------------------------------------------
// Watchlist commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(ctx);
    if json {
        println!("{}", serde_json::to_string_pretty(store.list())?);
    } else {
        for repo in store.list() {
            println!("{}", repo.name);
        }
    }
    Ok(())
}

fn cmd_add(ctx: &Context, args: RepoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let api = client(ctx)?;
    let mut store = open_store(ctx);
    let repo = store.add(&args.name, &api)?;
    println!("added {}", repo.name);
    Ok(())
}

fn cmd_rm(ctx: &Context, args: RepoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(ctx);
    let name = args.name.trim();
    if store.remove(name)? == 0 {
        println!("not tracked: {}", name);
    } else {
        println!("removed {}", name);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Remote read commands
// ---------------------------------------------------------------------------

fn cmd_info(ctx: &Context, args: RepoArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let api = client(ctx)?;
    let info = api.repository(args.name.trim())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&repository_to_json(&info))?);
    } else {
        println!("{}", format_repository(&info));
    }
    Ok(())
}

fn cmd_issues(ctx: &Context, args: IssuesArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let api = client(ctx)?;
    let name = args.name.trim();
    let issues = api.issues(name, args.state, args.page)?;
    let has_more = issues.len() >= ISSUES_PER_PAGE;

    if json {
        let page = IssuePageJson {
            repository: name.to_string(),
            state: args.state,
            page: args.page,
            has_more,
            issues: issues.iter().map(issue_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("no {} issues on page {}", args.state, args.page);
        return Ok(());
    }
    for issue in &issues {
        println!("{}", format_issue(issue));
    }
    if has_more {
        println!(
            "\nmore: rw issues {} --state {} --page {}",
            name,
            args.state,
            args.page + 1
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[api]\nbase_url = \"http://from-file\"\n\n[storage]\ndir = \"/from/file\"\n",
        )
        .unwrap();
        let config_arg = config_path.to_string_lossy().to_string();

        let cli = Cli::parse_from(["rw", "list", "--config", &config_arg]);
        let ctx = load_context(&cli).unwrap();
        assert_eq!(ctx.config.api.base_url, "http://from-file");
        assert_eq!(ctx.data_dir, PathBuf::from("/from/file"));

        let cli = Cli::parse_from([
            "rw",
            "list",
            "--config",
            &config_arg,
            "--api-url",
            "http://from-flag",
            "--data-dir",
            "/from/flag",
        ]);
        let ctx = load_context(&cli).unwrap();
        assert_eq!(ctx.config.api.base_url, "http://from-flag");
        assert_eq!(ctx.data_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn open_accepts_name_or_path() {
        let cli = Cli::parse_from(["rw", "open", "facebook/react"]);
        assert_eq!(
            initial_route(cli.command.as_ref()).unwrap(),
            Route::Repository("facebook/react".into())
        );

        let cli = Cli::parse_from(["rw", "open", "/repositorio/facebook%2Freact"]);
        assert_eq!(
            initial_route(cli.command.as_ref()).unwrap(),
            Route::Repository("facebook/react".into())
        );

        let cli = Cli::parse_from(["rw", "open", "/elsewhere"]);
        assert!(initial_route(cli.command.as_ref()).is_err());

        let cli = Cli::parse_from(["rw"]);
        assert_eq!(initial_route(cli.command.as_ref()).unwrap(), Route::Home);
    }
}
