//! File listing CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use nexus_core::config::AppConfig;
use nexus_core::error::AppError;
use nexus_core::types::{FolderId, GroupId};
use nexus_entity::file::File;

use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List the files of a folder visible to a group
    List {
        /// Folder ID
        #[arg(long)]
        folder: i64,
        /// Caller group
        #[arg(short, long)]
        group: String,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    id: i64,
    name: String,
    size: i64,
    public: bool,
    uploaded_by: String,
    created_at: String,
}

impl From<&File> for FileRow {
    fn from(f: &File) -> Self {
        Self {
            id: f.id.get(),
            name: f.name.clone(),
            size: f.size_bytes,
            public: f.visibility,
            uploaded_by: f.uploaded_by.to_string(),
            created_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect_services(config).await?;

    match &args.command {
        FileCommand::List { folder, group } => {
            let files = services
                .files
                .list_files_by_folder(FolderId::new(*folder), &GroupId::new(group.as_str()))
                .await?;
            let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    services.repositories.close().await;
    Ok(())
}
