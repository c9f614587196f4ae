use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::locale::Locale;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "mak-catalogue.json";

/// Environment variable overriding the source path.
pub const SOURCE_ENV: &str = "MAK_CATALOGUE_SOURCE";

/// Floor for the repaint interval, whatever the cache TTL.
pub const MIN_REPAINT_INTERVAL: Duration = Duration::from_secs(1);

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Workbook `.json` file or directory of `.csv` sections.
    pub source: PathBuf,
    pub cache_ttl_secs: u64,
    pub default_locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("catalogue.json"),
            cache_ttl_secs: 60,
            default_locale: Locale::English,
        }
    }
}

impl AppConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// How often the UI wakes up to check for an expired snapshot.
    pub fn repaint_interval(&self) -> Duration {
        self.cache_ttl().max(MIN_REPAINT_INTERVAL)
    }

    /// Parse a config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config file if present (defaults otherwise), then the environment override.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::from_file(path).unwrap_or_else(|e| {
                log::error!("Ignoring config file: {e:#}");
                Self::default()
            })
        } else {
            Self::default()
        };
        config.apply_env_override(std::env::var_os(SOURCE_ENV).map(PathBuf::from));
        config
    }

    fn apply_env_override(&mut self, source: Option<PathBuf>) {
        if let Some(source) = source.filter(|s| !s.as_os_str().is_empty()) {
            log::info!("Using source from {SOURCE_ENV}: {}", source.display());
            self.source = source;
        }
    }
}
