//! Config subcommand handlers.

use ltexporter_config::{Config, ConfigError, config_path};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// `config path` works even when the file is missing or invalid; `config
/// show` needs it loaded.
pub fn handle(
    args: &ConfigArgs,
    loaded: Result<Config, ConfigError>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let config = loaded?;
            let text = config.to_toml()?;
            let out = output::render_single(global.output, &config, text.trim_end())?;
            output::print_output(&out, global.quiet);
        }
        ConfigCommand::Path => {
            let path = global.config.clone().unwrap_or_else(config_path);
            output::print_output(&path.display().to_string(), global.quiet);
        }
    }
    Ok(())
}
