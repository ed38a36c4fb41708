pub mod config;

pub use config::{apply_overrides, load_config, AppConfig, ConfigOverrides};
