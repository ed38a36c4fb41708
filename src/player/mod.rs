//! External playback handoff.
//!
//! Selecting a video hands `(id, name)` to a player process; the browser
//! keeps running while the player owns the stream.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::{Child, Command};
use tracing::info;

use crate::common::config::AppConfig;

/// Direct-download URL the player streams from.
pub fn stream_url(base_url: &str, file_id: &str) -> String {
    format!("{}/files/{}?alt=media", base_url.trim_end_matches('/'), file_id)
}

/// Spawns the configured player on a file's stream URL.
///
/// The child is detached and outlives individual browser screens; output
/// is discarded so the player cannot scribble over the TUI.
pub fn launch(config: &AppConfig, file_id: &str, title: &str) -> Result<Child> {
    let url = stream_url(&config.drive.base_url, file_id);
    let player = &config.player;

    let mut command = Command::new(&player.command);
    command.args(&player.args);

    if let Some(token) = config.auth.access_token.as_deref() {
        command.arg(format!(
            "--http-header-fields=Authorization: Bearer {}",
            token
        ));
    }

    let child = command
        .arg(format!("--force-media-title={}", title))
        .arg(&url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch player '{}'", player.command))?;

    info!("Playing '{}' ({}) via {}", title, file_id, player.command);
    Ok(child)
}
