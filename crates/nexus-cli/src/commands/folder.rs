//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use nexus_core::config::AppConfig;
use nexus_core::error::AppError;
use nexus_core::types::{FolderId, GroupId};
use nexus_entity::folder::Folder;
use nexus_service::CreateFolderParams;

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders, all of them or those visible to one group
    List {
        /// Only folders visible to this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Owning group
        #[arg(short, long)]
        group: String,
        /// Make the folder visible to every group
        #[arg(long)]
        public: bool,
    },
    /// Delete an empty folder
    Delete {
        /// Folder ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
pub struct FolderRow {
    id: i64,
    name: String,
    files: i64,
    public: bool,
    group: String,
    created_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.get(),
            name: f.name.clone(),
            files: f.file_count,
            public: f.visibility,
            group: f.owner_group_id.to_string(),
            created_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect_services(config).await?;

    match &args.command {
        FolderCommand::List { group } => {
            let folders = match group {
                Some(g) => services.folders.list_folders(&GroupId::new(g.as_str())).await?,
                None => services.folders.list_all_folders().await?,
            };
            let rows: Vec<FolderRow> = folders.iter().map(FolderRow::from).collect();
            output::print_list(&rows, format);
        }
        FolderCommand::Create {
            name,
            group,
            public,
        } => {
            let folder = services
                .folders
                .create_folder(
                    &GroupId::new(group.as_str()),
                    CreateFolderParams {
                        name: name.clone(),
                        visibility: *public,
                    },
                )
                .await?;
            match format {
                OutputFormat::Json => output::print_json(&folder),
                OutputFormat::Table => output::print_success(&format!(
                    "Folder '{}' created (id: {})",
                    folder.name, folder.id
                )),
            }
        }
        FolderCommand::Delete { id, yes } => {
            let id = FolderId::new(*id);
            let folder = services.folders.get_folder(id).await?;
            if !super::confirm(&format!("Delete folder '{}' ({id})?", folder.name), *yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            services.folders.delete_folder(id).await?;
            output::print_success(&format!("Folder {id} deleted"));
        }
    }

    services.repositories.close().await;
    Ok(())
}
