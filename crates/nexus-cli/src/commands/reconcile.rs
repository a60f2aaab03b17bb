//! Folder file-count reconciliation.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use nexus_core::config::AppConfig;
use nexus_core::error::AppError;
use nexus_core::types::FolderId;
use nexus_service::ReconcileReport;

use crate::output::{self, OutputFormat};

/// Arguments for the reconcile command
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Reconcile only this folder
    #[arg(long)]
    pub folder: Option<i64>,
}

/// Reconcile display row
#[derive(Debug, Serialize, Tabled)]
pub struct ReconcileRow {
    folder_id: i64,
    recorded: i64,
    actual: i64,
    drifted: bool,
}

impl From<&ReconcileReport> for ReconcileRow {
    fn from(r: &ReconcileReport) -> Self {
        Self {
            folder_id: r.folder_id.get(),
            recorded: r.recorded,
            actual: r.actual,
            drifted: r.drifted,
        }
    }
}

/// Execute the reconcile command
pub async fn execute(
    args: &ReconcileArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect_services(config).await?;

    let reports = match args.folder {
        Some(id) => vec![services.coordinator.reconcile(FolderId::new(id)).await?],
        None => services.coordinator.reconcile_all().await?,
    };

    let rows: Vec<ReconcileRow> = reports.iter().map(ReconcileRow::from).collect();
    output::print_list(&rows, format);

    let drifted = reports.iter().filter(|r| r.drifted).count();
    if format == OutputFormat::Table && drifted > 0 {
        output::print_warning(&format!("{drifted} folder(s) had drifted and were corrected"));
    }

    services.repositories.close().await;
    Ok(())
}
