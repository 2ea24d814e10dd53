use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::MapSource;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::session;
use crate::cli::CliResult;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::{InfraError, ServiceContainer};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    if !settings.color {
        colored::control::set_override(false);
    }
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None | Some(Commands::Explore) => _explore(&container),
        Some(Commands::Tree) => _tree(&container),
        Some(Commands::Config { command }) => _config(&container, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
    }
}

/// Layered settings with command line flags on top.
fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(map) = &cli.map {
        settings.map = Some(map.clone());
    }
    if cli.no_color {
        settings.color = false;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn map_source(container: &ServiceContainer) -> MapSource {
    MapSource::from_option(container.settings.map.as_deref())
}

#[instrument(skip(container))]
fn _explore(container: &ServiceContainer) -> CliResult<()> {
    let map = container.map_service.load(&map_source(container))?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stop = session::explore(map, stdin.lock(), stdout.lock())
        .map_err(|e| InfraError::io("write session output", e))?;
    debug!(%stop, "exploration finished");
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer) -> CliResult<()> {
    let map = container.map_service.load(&map_source(container))?;
    let mut stdout = io::stdout().lock();
    output::info(&mut stdout, &map.to_tree_string())
        .map_err(|e| InfraError::io("write tree", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn _config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    let text = match command {
        ConfigCommands::Show => container.settings.to_toml()?,
        ConfigCommands::Path => match global_config_path() {
            Some(path) => path.display().to_string(),
            None => {
                output::warning("cannot determine config directory");
                return Ok(());
            }
        },
        ConfigCommands::Template => Settings::template(),
    };
    output::info(&mut stdout, text.trim_end()).map_err(|e| InfraError::io("write config", e))?;
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
