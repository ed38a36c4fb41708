//! Configuration schema, defaults, and layered loading.
//!
//! Precedence: defaults < config file < environment < CLI
use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const DEFAULT_PAGE_SIZE: u32 = 100;
const MAX_PAGE_SIZE: u32 = 1000; // Drive API cap

pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "drivestream")
        .map(|p| p.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("drivestream.toml"))
}

/// Listing endpoint tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveSettings {
    pub base_url: String,
    /// Entries requested per page
    pub page_size: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// OAuth bearer token presented on every Drive call
    pub access_token: Option<String>,
}

/// External player handoff settings. The defaults target mpv; other
/// players need their own header/title flags via `args`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Player binary receiving the stream URL
    pub command: String,
    /// Extra arguments placed before the URL
    pub args: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiSettings {
    pub show_sizes: bool,
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self { show_sizes: true }
    }
}

/// Fully resolved application configuration after all layers merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub drive: DriveSettings,
    pub auth: AuthSettings,
    pub player: PlayerSettings,
    pub tui: TuiSettings,
}

impl AppConfig {
    /// Validates tuning bounds and rejects unusable values.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.drive.page_size >= 1,
            "Invalid config: drive.page_size must be >= 1"
        );
        ensure!(
            self.drive.page_size <= MAX_PAGE_SIZE,
            "Invalid config: drive.page_size must be <= {MAX_PAGE_SIZE}"
        );
        ensure!(
            self.drive.timeout_secs >= 1,
            "Invalid config: drive.timeout_secs must be >= 1"
        );
        ensure!(
            !self.drive.base_url.is_empty(),
            "Invalid config: drive.base_url must not be empty"
        );
        ensure!(
            !self.player.command.is_empty(),
            "Invalid config: player.command must not be empty"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Loads config from defaults/file/env.
pub fn load_config() -> Result<AppConfig> {
    let path = config_path();

    let config: AppConfig = Figment::new()
        .merge(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(&path))
        .merge(
            // Sections are one level deep, so only the first underscore
            // nests: DRIVE_PAGE_SIZE -> drive.page_size
            Env::prefixed("DRIVESTREAM_")
                .map(|key| key.as_str().to_lowercase().replacen('_', ".", 1).into())
                .split("."),
        )
        .extract()
        .context("Failed to load configuration")?;

    config.validate()?;

    Ok(config)
}

/// Applies runtime overrides to a loaded config.
pub fn apply_overrides(mut config: AppConfig, overrides: &ConfigOverrides) -> AppConfig {
    if let Some(page_size) = overrides.page_size {
        config.drive.page_size = page_size;
    }

    config
}
