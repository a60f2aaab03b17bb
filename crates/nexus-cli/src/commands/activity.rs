//! Student activity CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use nexus_core::config::AppConfig;
use nexus_core::error::AppError;
use nexus_core::types::Email;

use crate::output::{self, OutputFormat};

/// Arguments for activity commands
#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Activity subcommand
    #[command(subcommand)]
    pub command: ActivityCommand,
}

/// Activity subcommands
#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Show the trailing seven-day summary of a student
    Weekly {
        /// Student email
        email: String,
    },
}

/// Daily activity display row
#[derive(Debug, Serialize, Tabled)]
pub struct DayRow {
    date: String,
    minutes: i64,
    in_window: bool,
}

/// Execute activity commands
pub async fn execute(
    args: &ActivityArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect_services(config).await?;

    match &args.command {
        ActivityCommand::Weekly { email } => {
            let summary = services
                .activity
                .weekly_summary(&Email::new(email.as_str()))
                .await?;

            match format {
                OutputFormat::Json => output::print_json(&summary),
                OutputFormat::Table => {
                    let rows: Vec<DayRow> = summary
                        .daily_activity
                        .iter()
                        .map(|d| DayRow {
                            date: d.date.to_string(),
                            minutes: d.minutes_spent,
                            in_window: d.date >= summary.window_start
                                && d.date <= summary.window_end,
                        })
                        .collect();
                    output::print_list(&rows, format);
                    output::print_kv(
                        "Window",
                        &format!("{} .. {}", summary.window_start, summary.window_end),
                    );
                    output::print_kv("Weekly minutes", &summary.weekly_summary.to_string());
                }
            }
        }
    }

    services.repositories.close().await;
    Ok(())
}
