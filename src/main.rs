use clap::Parser;
use repowatch::cli::commands::{Cli, Commands};
use repowatch::cli::handlers;
use repowatch::io::log;

fn main() {
    let cli = Cli::parse();

    let ctx = match handlers::load_context(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        None | Some(Commands::Open(_)) => run_tui(&cli, &ctx),
        Some(_) => {
            log::init_stderr("warn");
            handlers::dispatch(cli, &ctx)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// No subcommand (or `open`) launches the TUI
fn run_tui(cli: &Cli, ctx: &handlers::Context) -> Result<(), Box<dyn std::error::Error>> {
    let route = handlers::initial_route(cli.command.as_ref())?;
    if let Err(e) = log::init_file(&ctx.data_dir, "info") {
        eprintln!("warning: logging disabled: {}", e);
    }
    repowatch::tui::run(&ctx.config, &ctx.data_dir, route)
}
