//! Configuration management for Classify using the prefer crate.
//!
//! Precedence, lowest to highest:
//! 1. built-in defaults
//! 2. config file (auto-discovered by prefer, or `--config`)
//! 3. `CLASSIFY_*` environment variables
//! 4. command-line flags

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::IndexKind;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET: &str = "data/redlining.geojson";

/// Default bind address for the web server.
pub const DEFAULT_BIND: &str = "127.0.0.1:3232";

/// Application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// GeoJSON file loaded at start-up.
    pub dataset_path: PathBuf,
    /// Address the web server binds to.
    pub bind: String,
    /// Bounding-box index implementation.
    pub index: IndexKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            bind: DEFAULT_BIND.to_string(),
            index: IndexKind::default(),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset path (relative paths resolve against the config file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// Bind address, e.g. `0.0.0.0:3232`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Bounding-box index: `linear` or `envelope`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexKind>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no config file is found.
    pub async fn load() -> Self {
        match prefer::load("classify").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Directory of the config file, used to resolve relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are joined onto `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref dataset) = self.dataset {
            settings.dataset_path = self.resolve_path(dataset, base_dir);
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
        if let Some(index) = self.index {
            settings.index = index;
        }
    }
}

/// Apply `CLASSIFY_*` overrides using `lookup` to read variables.
/// Empty values are ignored; an unknown index is logged and ignored.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

    if let Some(dataset) = var("CLASSIFY_DATASET") {
        tracing::debug!("Using CLASSIFY_DATASET from environment: {}", dataset);
        settings.dataset_path = PathBuf::from(shellexpand::tilde(&dataset).as_ref());
    }
    if let Some(bind) = var("CLASSIFY_BIND") {
        tracing::debug!("Using CLASSIFY_BIND from environment: {}", bind);
        settings.bind = bind;
    }
    if let Some(index) = var("CLASSIFY_INDEX") {
        match index.parse() {
            Ok(kind) => settings.index = kind,
            Err(e) => tracing::warn!("Ignoring CLASSIFY_INDEX: {}", e),
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Dataset path (--dataset flag).
    pub dataset: Option<PathBuf>,
}

/// Load settings from config file, environment and CLI options.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = match options.config_path {
        Some(ref path) => match Config::load_from_path(path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Config::default()
            }
        },
        None => Config::load().await,
    };

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings, &base_dir);
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    // --dataset takes precedence over everything
    if let Some(dataset) = options.dataset {
        settings.dataset_path = dataset;
    }

    (settings, config)
}
