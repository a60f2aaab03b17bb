//! CLI command definitions and dispatch.

pub mod activity;
pub mod config;
pub mod file;
pub mod folder;
pub mod reconcile;

use clap::{Parser, Subcommand};

use nexus_core::config::AppConfig;
use nexus_core::error::AppError;
use nexus_database::Repositories;
use nexus_service::Services;

use crate::output::OutputFormat;

/// Research Nexus: folder, file, and activity administration
#[derive(Debug, Parser)]
#[command(name = "nexus", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (config/{env}.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log backend activity to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Folder management
    Folder(folder::FolderArgs),
    /// File listing
    File(file::FileArgs),
    /// Recompute folder file counts from the file rows
    Reconcile(reconcile::ReconcileArgs),
    /// Student activity
    Activity(activity::ActivityArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;

        match &self.command {
            Commands::Folder(args) => folder::execute(args, &config, self.format).await,
            Commands::File(args) => file::execute(args, &config, self.format).await,
            Commands::Reconcile(args) => reconcile::execute(args, &config, self.format).await,
            Commands::Activity(args) => activity::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }
}

/// Helper: connect the configured backend and storage and wire the services
pub async fn connect_services(config: &AppConfig) -> Result<Services, AppError> {
    let repositories = Repositories::connect(&config.database).await?;
    let storage = nexus_storage::build_provider(&config.storage).await?;
    Ok(Services::new(repositories, storage, config))
}

/// Helper: ask before a destructive action unless `--yes` was given
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, AppError> {
    if assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::validation(format!("Input error: {e}")))
}
