//! Clap derive structures for the `ltexporter` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ltexporter -- LTE interface telemetry as Prometheus-style samples
#[derive(Debug, Parser)]
#[command(
    name = "ltexporter",
    version,
    about = "Collect LTE interface telemetry from RouterOS-style devices",
    long_about = "Lists each device's LTE interfaces, takes a one-shot monitor snapshot\n\
        of every interface, and prints the resulting labeled metric samples.\n\n\
        Device replies are served from a recorded JSON fixture (--replay).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, short = 'C', env = "LTEXPORTER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LTEXPORTER_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text (Prometheus text format for samples, one name per line otherwise)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every metric the enabled collectors can emit
    #[command(alias = "desc")]
    Describe,

    /// Scrape devices and print the samples
    Scrape(ScrapeArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Recorded device replies (JSON fixture)
    #[arg(long, short = 'r', value_name = "FILE")]
    pub replay: PathBuf,

    /// Only scrape these configured devices (repeatable)
    #[arg(long, short = 'd', value_name = "NAME", conflicts_with = "name")]
    pub device: Vec<String>,

    /// Scrape a single ad-hoc device with this name instead of the config
    #[arg(long, requires = "address")]
    pub name: Option<String>,

    /// Address label of the ad-hoc device
    #[arg(long, requires = "name")]
    pub address: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved configuration
    Show,

    /// Print the config file path in use
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ad_hoc_device_needs_both_name_and_address() {
        let err = Cli::try_parse_from(["ltexporter", "scrape", "--replay", "r.json", "--name", "x"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
