//! Global evcal configuration.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CalError, CalResult};
use crate::storage::{FileStore, JsonPersistence};
use crate::store::EventStore;

static DEFAULT_DATA_DIR: &str = "~/.local/share/evcal";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}

/// Configuration at ~/.config/evcal/config.toml
///
/// Every key can be overridden from the environment with an `EVCAL_` prefix,
/// e.g. `EVCAL_DATA_DIR=/tmp/cal`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EvcalConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// First column of the month grid.
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
}

impl Default for EvcalConfig {
    fn default() -> Self {
        EvcalConfig {
            data_dir: default_data_dir(),
            week_start: default_week_start(),
        }
    }
}

impl EvcalConfig {
    pub fn config_path() -> CalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalError::Config("Could not determine config directory".into()))?
            .join("evcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file on first run.
    pub fn load() -> CalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load `path` with `EVCAL_*` environment overrides applied.
    pub fn load_from(path: &Path) -> CalResult<Self> {
        Self::build(path, true)
    }

    /// Load only what is written in `path`, ignoring the environment.
    pub fn load_file(path: &Path) -> CalResult<Self> {
        Self::build(path, false)
    }

    fn build(path: &Path, with_env: bool) -> CalResult<Self> {
        let mut builder = Config::builder().add_source(File::from(path).required(false));
        if with_env {
            builder = builder.add_source(Environment::with_prefix("EVCAL"));
        }

        builder
            .build()
            .map_err(|e| CalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalError::Config(e.to_string()))
    }

    /// Persist a new first day of the week in `path`.
    ///
    /// Other keys keep their written values. A file that no longer parses is
    /// replaced by defaults so the command can repair it.
    pub fn set_week_start(path: &Path, week_start: Weekday) -> CalResult<Self> {
        let mut stored = Self::load_file(path).unwrap_or_else(|e| {
            warn!(error = %e, path = %path.display(), "rewriting unreadable config");
            Self::default()
        });

        stored.week_start = week_start;
        stored.save_to(path)?;
        Ok(stored)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Open the event store persisted under the data directory.
    pub fn open_store(&self) -> EventStore<JsonPersistence<FileStore>> {
        EventStore::open(JsonPersistence::new(FileStore::new(self.data_path())))
    }

    pub fn save_to(&self, path: &Path) -> CalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| CalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalResult<()> {
        let contents = format!(
            "\
# evcal configuration

# Where events are stored:
# data_dir = \"{}\"

# First day of the week in the month view (sunday or monday):
# week_start = \"sunday\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
