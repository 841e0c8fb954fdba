mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use equiptrack_core::AppConfig;
use equiptrack_service::DatasetService;
use equiptrack_storage::Storage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "equiptrack")]
#[command(about = "Equipment dataset summaries with bounded per-user history", long_about = None)]
struct Cli {
    /// SQLite database file (overrides EQUIPTRACK_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Summarize a CSV file and store it
    Ingest {
        file: PathBuf,
        #[arg(short, long)]
        owner: String,
        /// Display name, defaults to the file name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Retained datasets, newest first
    List {
        #[arg(short, long)]
        owner: String,
    },
    Get {
        id: i64,
        #[arg(short, long)]
        owner: String,
    },
    Delete {
        id: i64,
        #[arg(short, long)]
        owner: String,
    },
    /// Weighted statistics across retained datasets
    Summary {
        #[arg(short, long)]
        owner: String,
    },
    /// Render a dataset report to a file or stdout
    Report {
        id: i64,
        #[arg(short, long)]
        owner: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub(crate) fn open_service(config: &AppConfig) -> Result<DatasetService> {
    ensure_db_dir(&config.db_path)?;
    let storage = Storage::from_config(config)?;
    Ok(DatasetService::new(Arc::new(storage)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(&config, &host, port).await,
        Commands::Ingest { file, owner, name } => {
            commands::datasets::ingest(&config, &file, &owner, name.as_deref()).await
        },
        Commands::List { owner } => commands::datasets::list(&config, &owner).await,
        Commands::Get { id, owner } => commands::datasets::get(&config, &owner, id).await,
        Commands::Delete { id, owner } => commands::datasets::delete(&config, &owner, id).await,
        Commands::Summary { owner } => commands::datasets::summary(&config, &owner).await,
        Commands::Report { id, owner, out } => {
            commands::datasets::report(&config, &owner, id, out.as_deref()).await
        },
    }
}
