//! User settings for Finance Diary
//!
//! Manages user preferences: the reserved default account name, logging
//! verbosity, report range and display formats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::DiaryPaths;
use crate::error::DiaryError;
use crate::models::{is_valid_display_format, DISPLAY_DATE_FORMAT};

/// Name of the account that deposits and withdrawals land in
pub const DEFAULT_ACCOUNT_NAME: &str = "Default Account";

/// User settings for Finance Diary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Reserved account that deposits and withdrawals are applied to
    #[serde(default = "default_account_name")]
    pub default_account_name: String,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Earliest month a "since" report will go back to
    #[serde(default = "default_report_start")]
    pub report_start: NaiveDate,

    /// Date format for report rows (strftime format)
    #[serde(default = "default_date_format")]
    pub display_date_format: String,

    /// Save pending changes when the shell exits
    #[serde(default = "default_autosave")]
    pub autosave_on_exit: bool,
}

fn default_account_name() -> String {
    DEFAULT_ACCOUNT_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_report_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 6, 1).unwrap_or_default()
}

fn default_date_format() -> String {
    DISPLAY_DATE_FORMAT.to_string()
}

fn default_autosave() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_account_name: default_account_name(),
            log_level: default_log_level(),
            report_start: default_report_start(),
            display_date_format: default_date_format(),
            autosave_on_exit: default_autosave(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DiaryPaths) -> Result<Self, DiaryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| DiaryError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_yaml::from_str(&contents).map_err(|e| {
                DiaryError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if settings.default_account_name.trim().is_empty() {
                return Err(DiaryError::Config(
                    "default_account_name cannot be empty".into(),
                ));
            }

            if !is_valid_display_format(&settings.display_date_format) {
                return Err(DiaryError::Config(format!(
                    "display_date_format '{}' is not a usable date pattern",
                    settings.display_date_format
                )));
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DiaryPaths) -> Result<(), DiaryError> {
        paths.ensure_directories()?;

        let contents = serde_yaml::to_string(self)
            .map_err(|e| DiaryError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DiaryError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
