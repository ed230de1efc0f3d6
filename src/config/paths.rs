//! Path management for Finance Diary
//!
//! Provides XDG-compliant path resolution for settings and the CSV database.
//!
//! ## Path Resolution Order
//!
//! 1. `FINANCE_DIARY_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finance-diary` or `~/.config/finance-diary`
//! 3. Windows: `%APPDATA%\finance-diary`

use std::path::PathBuf;

use crate::error::DiaryError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "FINANCE_DIARY_DATA_DIR";

/// Manages all paths used by Finance Diary
#[derive(Debug, Clone)]
pub struct DiaryPaths {
    /// Base directory for all Finance Diary data
    base_dir: PathBuf,
}

impl DiaryPaths {
    /// Create a new DiaryPaths instance
    ///
    /// Path resolution:
    /// 1. `FINANCE_DIARY_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/finance-diary` or `~/.config/finance-diary`
    /// 3. Windows: `%APPDATA%\finance-diary`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, DiaryError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create DiaryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/finance-diary/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/finance-diary/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.yaml")
    }

    /// Get the path to cash_registers.csv
    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("cash_registers.csv")
    }

    /// Get the path to finance_operations.csv
    pub fn finance_operations_file(&self) -> PathBuf {
        self.data_dir().join("finance_operations.csv")
    }

    /// Get the path to neutral_operations.csv
    pub fn neutral_operations_file(&self) -> PathBuf {
        self.data_dir().join("neutral_operations.csv")
    }

    /// Get the path to the id generator state
    pub fn id_state_file(&self) -> PathBuf {
        self.data_dir().join("id_producer.db")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/finance-diary/)
    /// - Data directory (~/.config/finance-diary/data/)
    pub fn ensure_directories(&self) -> Result<(), DiaryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DiaryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DiaryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Finance Diary has been initialized (accounts file exists)
    pub fn is_initialized(&self) -> bool {
        self.accounts_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, DiaryError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                DiaryError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("finance-diary"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, DiaryError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| DiaryError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("finance-diary"))
}
