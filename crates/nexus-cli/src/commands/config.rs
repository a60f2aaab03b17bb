//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use nexus_core::config::AppConfig;
use nexus_core::error::AppError;
use nexus_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = mask_password(&shown.database.url);

            match format {
                OutputFormat::Json => output::print_json(&shown),
                OutputFormat::Table => {
                    output::print_kv("Server", &shown.server.bind_address());
                    output::print_kv("Database backend", &shown.database.backend.to_string());
                    output::print_kv("Database URL", &shown.database.url);
                    output::print_kv(
                        "Query timeout",
                        &format!("{} ms", shown.database.query_timeout_ms),
                    );
                    output::print_kv("Storage provider", &shown.storage.provider.to_string());
                    output::print_kv("Storage root", &shown.storage.local.root_path);
                    output::print_kv(
                        "Max upload",
                        &format!("{} bytes", shown.storage.max_upload_size_bytes),
                    );
                    output::print_kv(
                        "Count retries",
                        &shown.consistency.count_retry_attempts.to_string(),
                    );
                    output::print_kv(
                        "Reconcile on startup",
                        &shown.consistency.reconcile_on_startup.to_string(),
                    );
                    output::print_kv(
                        "Logging",
                        &format!("{} ({})", shown.logging.level, shown.logging.format),
                    );
                }
            }
        }
    }

    Ok(())
}
