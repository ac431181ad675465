//! User settings for teller-cli
//!
//! Settings are the only thing written to disk; customers and accounts
//! always live in memory.

use serde::{Deserialize, Serialize};

use super::paths::TellerPaths;
use crate::error::TellerError;
use crate::models::sequence::DEFAULT_FIRST_ACCOUNT_NUMBER;

/// What to do with an account whose opening deposit was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnderfundedPolicy {
    /// Register the account with a zero balance (default)
    #[default]
    Keep,
    /// Do not register the account at all
    Cancel,
}

/// User settings for teller-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Handling of accounts whose opening deposit is refused
    #[serde(default)]
    pub underfunded_policy: UnderfundedPolicy,

    /// Whether sample customers and accounts are created at startup
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,

    /// First account number handed out in a fresh process
    #[serde(default = "default_first_account_number")]
    pub first_account_number: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_true() -> bool {
    true
}

fn default_first_account_number() -> u32 {
    DEFAULT_FIRST_ACCOUNT_NUMBER
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            underfunded_policy: UnderfundedPolicy::default(),
            seed_sample_data: default_true(),
            first_account_number: default_first_account_number(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults on first run
    pub fn load_or_create(paths: &TellerPaths) -> Result<Self, TellerError> {
        let settings_path = paths.settings_file();

        if paths.has_settings() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TellerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TellerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            let settings = Settings::default();
            settings.save(paths)?;
            tracing::info!(path = %settings_path.display(), "default settings written");
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TellerPaths) -> Result<(), TellerError> {
        paths.ensure_base_dir()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TellerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| TellerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
