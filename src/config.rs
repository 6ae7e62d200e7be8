//! Configuration for keydb
//!
//! Centralized configuration with sensible defaults. Paths live here rather
//! than in process-wide settings so every `Store` states exactly which files
//! it owns.

use std::path::PathBuf;

use crate::error::{KeyDbError, Result};

/// Default location of the append-only log
pub const DEFAULT_LOG_PATH: &str = "./logs";

/// Default location of the JSON index
pub const DEFAULT_INDEX_PATH: &str = "./index.json";

/// Main configuration for a keydb store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // File Locations
    // -------------------------------------------------------------------------
    /// Append-only log holding `key:value` records
    pub log_path: PathBuf,

    /// JSON index mapping each key to its byte range in the log
    pub index_path: PathBuf,

    // -------------------------------------------------------------------------
    // Durability
    // -------------------------------------------------------------------------
    /// fsync the log after every append
    pub sync_on_write: bool,

    // -------------------------------------------------------------------------
    // Flush Behaviour
    // -------------------------------------------------------------------------
    /// Reset the in-memory log length to zero when the store is flushed.
    ///
    /// Off by default: a flush truncates both files but leaves the cached
    /// length untouched, so later writes record offsets past the physical end.
    pub reset_length_on_flush: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            sync_on_write: false,
            reset_length_on_flush: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration describes two distinct files
    pub fn validate(&self) -> Result<()> {
        if self.log_path.as_os_str().is_empty() {
            return Err(KeyDbError::Config("log path is empty".to_string()));
        }
        if self.index_path.as_os_str().is_empty() {
            return Err(KeyDbError::Config("index path is empty".to_string()));
        }
        if self.log_path == self.index_path {
            return Err(KeyDbError::Config(format!(
                "log and index share the same path: {}",
                self.log_path.display()
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the index file path
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.index_path = path.into();
        self
    }

    /// Place both files inside `dir` using their default file names
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.config.log_path = dir.join("logs");
        self.config.index_path = dir.join("index.json");
        self
    }

    /// fsync the log after every append
    pub fn sync_on_write(mut self, enabled: bool) -> Self {
        self.config.sync_on_write = enabled;
        self
    }

    /// Reset the cached log length on flush
    pub fn reset_length_on_flush(mut self, enabled: bool) -> Self {
        self.config.reset_length_on_flush = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
