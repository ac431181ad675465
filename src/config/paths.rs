//! Where teller-cli keeps its settings file
//!
//! Only `config.json` lives on disk. The directory is taken from
//! `TELLER_CLI_DATA_DIR` when set, otherwise from the platform's per-user
//! config location with a `teller-cli` subdirectory.

use std::path::{Path, PathBuf};

use crate::error::TellerError;

/// Overrides the config directory; used by tests and portable installs
pub const DATA_DIR_ENV: &str = "TELLER_CLI_DATA_DIR";

const APP_DIR: &str = "teller-cli";
const SETTINGS_FILE: &str = "config.json";

#[derive(Debug, Clone)]
pub struct TellerPaths {
    base_dir: PathBuf,
}

impl TellerPaths {
    /// Resolve the config directory from the environment
    pub fn new() -> Result<Self, TellerError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => platform_config_dir()?.join(APP_DIR),
        };

        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE)
    }

    /// Create the config directory and any missing parents
    pub fn ensure_base_dir(&self) -> Result<(), TellerError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            TellerError::Io(format!(
                "Failed to create {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }

    /// Whether a settings file has been written yet
    pub fn has_settings(&self) -> bool {
        self.settings_file().is_file()
    }
}

#[cfg(not(windows))]
fn platform_config_dir() -> Result<PathBuf, TellerError> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg));
    }

    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".config"))
        .ok_or_else(|| TellerError::Config("HOME is not set".into()))
}

#[cfg(windows)]
fn platform_config_dir() -> Result<PathBuf, TellerError> {
    std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .ok_or_else(|| TellerError::Config("APPDATA is not set".into()))
}
