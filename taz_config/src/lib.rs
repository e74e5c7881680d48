use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of extra config files.
pub const EXTRA_CONFIG_ENV: &str = "TAZ_CONFIG";

/// Load the default config file merged with the files listed in
/// [`EXTRA_CONFIG_ENV`].
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Ok(extra) = std::env::var(EXTRA_CONFIG_ENV) {
        paths.extend(
            extra
                .split(':')
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        );
    }
    load_paths(&paths)
}

/// Load and merge the given config files. Later files take precedence.
pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub contact: ContactConfig,
    pub toast: ToastConfig,
    pub theme: ThemeConfig,
    pub analytics: Option<AnalyticsConfig>,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub form_name: String,
    pub analytics_timeout: Duration,
    pub spam: ContactSpamConfig,
    pub dispatch: ContactDispatchConfig,
}

#[derive(Debug, Deserialize)]
pub struct ContactSpamConfig {
    pub cooldown: Duration,
    pub hourly_limit: usize,
    pub daily_limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct ContactDispatchConfig {
    pub delay: Duration,
    pub timeout: Duration,
    pub simulate_failure: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToastConfig {
    pub duration: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ThemeConfig {
    pub prefer_dark: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    pub measurement_id: String,
    pub api_secret: String,
    pub client_id: Option<String>,
    pub endpoint_override: Option<Url>,
    pub timeout: Option<Duration>,
}
