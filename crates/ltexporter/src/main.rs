mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ltexporter_config::{Config, ConfigError, LogSettings};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logging settings come from the config, so load it before anything else.
    let loaded = ltexporter_config::load_config(cli.global.config.as_deref());
    init_tracing(
        cli.global.verbose,
        cli.global.quiet,
        loaded.as_ref().ok().map(|c| &c.log),
    );

    if let Err(err) = run(cli, loaded).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// `RUST_LOG` wins, then `-v`/`-q`, then `log.level` from the config.
fn init_tracing(verbosity: u8, quiet: bool, settings: Option<&LogSettings>) {
    let fallback = match (verbosity, quiet) {
        (0, true) => "error",
        (0, false) => settings.map_or("info", |s| s.level.as_str()),
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if settings.is_some_and(LogSettings::is_json) {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli, loaded: Result<Config, ConfigError>) -> Result<(), CliError> {
    match &cli.command {
        Command::Config(args) => commands::config_cmd::handle(args, loaded, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "ltexporter", &mut std::io::stdout());
            Ok(())
        }

        Command::Describe => commands::describe::handle(&loaded?, &cli.global),

        Command::Scrape(args) => {
            let config = loaded?;
            tracing::debug!(replay = %args.replay.display(), "dispatching scrape");
            commands::scrape::handle(args, &config, &cli.global).await
        }
    }
}
