use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const QUALIFIER: &str = "com.github";
const ORGANIZATION: &str = "favdirs";
const APPLICATION: &str = "favdirs";

const CONFIG_DIR_ENV: &str = "FAVDIRS_CONFIG_DIR";
const DATA_DIR_ENV: &str = "FAVDIRS_DATA_DIR";

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DIRECTORIES_FILE_NAME: &str = "directories.json";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid toml in '{}': {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid json5 in '{}': {source}", .path.display())]
    Json5 {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Which configuration source feeds the catalog. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    JsonFile,
    PreferenceLines,
    FixedSlots,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceKind,
    pub directories_path: PathBuf,
    pub browse_on_empty_query: bool,
    pub log_level: String,
    /// Host preference mapping, in declaration order.
    pub preferences: toml::Table,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::JsonFile,
            directories_path: stable_app_data_dir().join(DIRECTORIES_FILE_NAME),
            browse_on_empty_query: true,
            log_level: "info".to_string(),
            preferences: toml::Table::new(),
            config_path: stable_config_dir().join(CONFIG_FILE_NAME),
        }
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
        return dir;
    }
    project_dirs()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join(APPLICATION))
}

pub fn stable_config_dir() -> PathBuf {
    if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
        return dir;
    }
    project_dirs()
        .map(|dirs| dirs.config_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join(APPLICATION))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = std::env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Reads the config at `path` (or the default location). A missing file
/// yields the defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| stable_config_dir().join(CONFIG_FILE_NAME));

    let raw = match std::fs::read_to_string(&config_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Config {
                config_path,
                ..Config::default()
            });
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: config_path,
                source,
            })
        }
    };

    let mut cfg = parse(&config_path, &raw)?;
    cfg.config_path = config_path;
    validate(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

fn parse(path: &Path, raw: &str) -> Result<Config, ConfigError> {
    let is_json5 = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json5"));

    if is_json5 {
        json5::from_str(raw).map_err(|source| ConfigError::Json5 {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(raw).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    let encoded = toml::to_string_pretty(cfg)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(&cfg.config_path, encoded).map_err(|source| ConfigError::Io {
        path: cfg.config_path.clone(),
        source,
    })
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.source == SourceKind::JsonFile && cfg.directories_path.as_os_str().is_empty() {
        return Err("directories_path is required for the json_file source".into());
    }

    let level = cfg.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(format!("unknown log_level '{}'", cfg.log_level));
    }

    Ok(())
}

pub fn log_level_filter(cfg: &Config) -> log::LevelFilter {
    cfg.log_level
        .trim()
        .parse()
        .unwrap_or(log::LevelFilter::Info)
}
