use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use drivestream::common::config::{
    apply_overrides, config_path, load_config, AppConfig, ConfigOverrides,
};
use drivestream::drive::{folder_query, DriveClient};
use drivestream::listing::PageFetcher;
use drivestream::player;
use drivestream::ui::output::{finish_spinner_error, finish_spinner_success, spinner};
use drivestream::ui::tui::FileBrowser;

#[derive(Parser)]
#[command(name = "drivestream")]
#[command(about = "Browse and stream video files from a cloud drive")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Entries per listing page (overrides config)
    #[arg(long, global = true)]
    page_size: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a folder in the terminal UI
    Browse {
        /// Folder id to start in (defaults to the drive root)
        folder: Option<String>,

        /// Raw filter expression instead of a folder id
        #[arg(long, conflicts_with = "folder")]
        query: Option<String>,
    },

    /// Hand a single file straight to the external player
    Play {
        /// File id to stream
        id: String,

        /// Title shown by the player
        #[arg(long, default_value = "drivestream")]
        title: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config()?;
    let config = apply_overrides(
        config,
        &ConfigOverrides {
            page_size: cli.page_size,
        },
    );

    match cli.command {
        Commands::Browse { folder, query } => {
            // The TUI owns the terminal, so logs go to a file
            init_logging(true)?;

            let (title, query) = match (folder, query) {
                (_, Some(query)) => ("Search results".to_string(), query),
                (Some(id), None) => ("Folder".to_string(), folder_query(&id)),
                (None, None) => ("My Drive".to_string(), folder_query("root")),
            };
            browse(config, title, query).await
        }
        Commands::Play { id, title } => {
            init_logging(false)?;
            play(&config, &id, &title).await
        }
    }
}

async fn browse(config: AppConfig, title: String, query: String) -> Result<()> {
    let token = require_token(&config)?;
    let client = DriveClient::new(&config.drive, token)?;
    let (fetcher, events) = PageFetcher::new(Arc::new(client));

    let mut browser = FileBrowser::new(config, fetcher, events, title, query);
    browser.run().await
}

async fn play(config: &AppConfig, id: &str, title: &str) -> Result<()> {
    let pb = spinner("Launching player...");

    let mut child = match player::launch(config, id, title) {
        Ok(child) => child,
        Err(err) => {
            finish_spinner_error(&pb, "Failed to launch player");
            return Err(err);
        }
    };
    finish_spinner_success(&pb, &format!("Playing '{}'", title));

    let status = child.wait().await.context("Failed to wait for player")?;
    if !status.success() {
        anyhow::bail!("Player exited with status: {}", status);
    }
    Ok(())
}

fn require_token(config: &AppConfig) -> Result<String> {
    config.auth.access_token.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "No access token configured. Set auth.access_token in {} or \
             the DRIVESTREAM_AUTH_ACCESS_TOKEN environment variable.",
            config_path().display()
        )
    })
}

fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let dir = directories::ProjectDirs::from("", "", "drivestream")
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&dir).context("Failed to create log directory")?;
        let file = std::fs::File::create(dir.join("drivestream.log"))
            .context("Failed to create log file")?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
