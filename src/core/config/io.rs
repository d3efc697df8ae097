use crate::core::config::data::{path_display, Config};
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur when loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory could be determined.
    #[error("Failed to determine config directory")]
    NoConfigDir,

    #[error("Failed to read config at {}: {source}", path_display(.path))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {}: {source}", path_display(.path))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config at {}: {source}", path_display(.path))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_from_path(&Self::get_config_path()?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::get_config_path()?)
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Write through a temp file in the same directory so a crash never leaves a torn config.
    pub fn save_to_path(&self, config_path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        };
        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let contents = toml::to_string_pretty(self)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(write_err)?;

        temp_file.write_all(contents.as_bytes()).map_err(write_err)?;
        temp_file.as_file_mut().sync_all().map_err(write_err)?;
        temp_file
            .persist(config_path)
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs =
            ProjectDirs::from("org", "medibot", "medibot").ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
