//! `scf` command line
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scf dump [--class NAME] [--target DIR]` | Build, compile and dump the container |
//! | `scf check` | Build and compile the container without writing it |
//! | `scf list` | List catalogued extensions and compiler passes |
//!
//! Inputs come from the configuration file (`--config`, or `scf.toml` in
//! the usual locations) and `SCF__*` environment variables.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scf_application::ContainerFactory;
use scf_application::bootstrap::{list_compiler_passes, list_extensions};
use scf_infrastructure::config::{AppConfig, ConfigLoader};
use scf_infrastructure::logging::init_logging;
use tracing::info;

use crate::default_factory;

/// Command line interface for the Shared Container Factory
#[derive(Parser, Debug)]
#[command(name = "scf")]
#[command(about = "Shared Container Factory - assemble, compile and dump service containers")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build, compile and dump the container
    Dump {
        /// Class name of the dumped container (defaults to `cache.class_name`)
        #[arg(long)]
        class: Option<String>,
        /// Existing directory to dump into (defaults to `cache.directory`)
        #[arg(long)]
        target: Option<PathBuf>,
    },
    /// Build and compile the container without writing anything
    Check,
    /// List catalogued extensions and compiler passes
    List,
}

/// Load configuration, initialize logging and run the command
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    init_logging(&config.logging)?;

    execute(&config, &cli.command, &mut std::io::stdout().lock())
}

/// Run a command against an already loaded configuration
///
/// Results are written to `out`; diagnostics go through tracing.
pub fn execute(
    config: &AppConfig,
    command: &Command,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::List => {
            writeln!(out, "Extensions:")?;
            for (name, description) in list_extensions() {
                writeln!(out, "  {name:<20} {description}")?;
            }
            writeln!(out, "Compiler passes:")?;
            for (name, description) in list_compiler_passes() {
                writeln!(out, "  {name:<20} {description}")?;
            }
        }
        Command::Check => {
            let factory = bootstrap(config)?;
            let mut container = factory.create_container(
                config.container.parameters.clone(),
                config.container.services_file.as_deref(),
            )?;
            container.compile()?;
            writeln!(
                out,
                "Container compiled: {} services, {} aliases, {} parameters",
                container.definitions().len(),
                container.aliases().len(),
                container.parameters().len()
            )?;
        }
        Command::Dump { class, target } => {
            let factory = bootstrap(config)?;
            let class_name = class.as_deref().unwrap_or(&config.cache.class_name);
            let target = target.as_deref().unwrap_or(&config.cache.directory);
            let parameters = config.container.parameters.clone();
            let services_file = config.container.services_file.as_deref();

            let path = if config.cache.enabled {
                let cache = factory.cache(target, class_name);
                factory.load_or_create(&cache, parameters, services_file)?;
                cache.path()
            } else {
                let mut container = factory.create_container(parameters, services_file)?;
                factory.dump_container(&mut container, class_name, target)?
            };
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}

fn bootstrap(config: &AppConfig) -> Result<ContainerFactory, Box<dyn std::error::Error>> {
    let mut factory = default_factory();
    let applied = factory.require_extension_configs(&config.bootstrap.manifests)?;
    info!(
        manifests = applied,
        extensions = factory.extensions().count(),
        compiler_passes = factory.compiler_passes().count(),
        "Factory bootstrapped"
    );
    Ok(factory)
}
