//! Command handlers: load settings, wire services, print results

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, FormatArg, ViewArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };

    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(command) => {
            let settings = Settings::load(Some(config_dir.as_path()))?;
            let container = ServiceContainer::new(settings);
            match command {
                Commands::Render { view, format } => cmd_render(&container, view, *format),
                Commands::Tree { view } => cmd_tree(&container, view),
                Commands::Config { command } => cmd_config(&container, command, &config_dir),
                Commands::Completion { .. } => Ok(()),
            }
        }
        None => Err(CliError::Usage(
            "no command given, see `treetable --help`".into(),
        )),
    }
}

/// Dataset argument, or the configured default.
fn resolve_file(container: &ServiceContainer, view: &ViewArgs) -> CliResult<PathBuf> {
    view.file
        .clone()
        .or_else(|| container.settings.default_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no dataset file given and no `default_file` configured".into())
        })
}

#[instrument(skip(container))]
fn cmd_render(container: &ServiceContainer, view: &ViewArgs, format: FormatArg) -> CliResult<()> {
    let file = resolve_file(container, view)?;
    let dataset = container.dataset_service().load(&file)?;
    let rendered = container
        .table_service()
        .render(&dataset, &view.view_options(), format.into())?;
    output::info(&rendered);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, view: &ViewArgs) -> CliResult<()> {
    let file = resolve_file(container, view)?;
    let dataset = container.dataset_service().load(&file)?;
    let root = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let outline = container
        .table_service()
        .outline(&dataset, &view.view_options(), &root);
    output::info(&outline);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    config_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let exists = path.exists();
                    output::path_entry("global", &path, exists);
                }
                None => output::error("no home directory, global config unavailable"),
            }
            let local = local_config_path(config_dir);
            output::path_entry("local", &local, local.exists());
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".into())
                })?
            } else {
                local_config_path(config_dir)
            };
            debug!(path = %path.display(), "initializing config");
            let written = container.config_service().init(&path)?;
            output::success(&format!("created {}", written.display()));
            Ok(())
        }
    }
}
