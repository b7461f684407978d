//! Configuration for the record store
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::validate::ValidationRules;

/// Main configuration for a record store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for the table files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── clients.jsonl
    ///     ├── airlines.jsonl
    ///     └── flights.jsonl
    pub data_dir: PathBuf,

    /// Template directory copied into `data_dir` on first run, one file per
    /// missing table (bundled sample data)
    pub seed_dir: Option<PathBuf>,

    // -------------------------------------------------------------------------
    // Validation Configuration
    // -------------------------------------------------------------------------
    /// Knobs forwarded to the field validators
    pub validation: ValidationRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed_dir: None,
            validation: ValidationRules::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Per-user data directory: `~/.local/share/RMS` on Linux,
/// `~/Library/Application Support/RMS` on macOS, `%APPDATA%\RMS` on Windows
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("RMS"))
        .unwrap_or_else(|| PathBuf::from("./rms_data"))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all table files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the first-run template directory
    pub fn seed_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.seed_dir = Some(path.into());
        self
    }

    /// Accept a single leading `+` in phone numbers
    pub fn allow_plus_phone(mut self, allow: bool) -> Self {
        self.config.validation.allow_plus_phone = allow;
        self
    }

    /// Require flight minutes to be a multiple of `step` (1 = any minute)
    pub fn minute_step(mut self, step: u32) -> Self {
        self.config.validation.minute_step = step;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
