//! Path management for the expense tracker
//!
//! Provides platform-aware path resolution for the backing store, settings,
//! and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSE_TRACKER_DIR` environment variable (if set)
//! 2. The platform config directory joined with `expense-tracker`
//!    (`~/.config/expense-tracker` on Linux, `%APPDATA%\expense-tracker` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::ExpenseError;

/// Environment variable that overrides the base directory
pub const DIR_ENV_VAR: &str = "EXPENSE_TRACKER_DIR";

const APP_DIR_NAME: &str = "expense-tracker";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Base directory for all data
    base_dir: PathBuf,
    /// Explicit backing store location, overriding `base_dir/expenses.txt`
    store_override: Option<PathBuf>,
}

impl ExpensePaths {
    /// Create a new ExpensePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `EXPENSE_TRACKER_DIR` is not set.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = if let Ok(custom) = std::env::var(DIR_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self {
            base_dir,
            store_override: None,
        })
    }

    /// Create ExpensePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            store_override: None,
        }
    }

    /// Point the backing store at an explicit file
    pub fn with_store_file(mut self, path: PathBuf) -> Self {
        self.store_override = Some(path);
        self
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the backing store
    pub fn expenses_file(&self) -> PathBuf {
        self.store_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join("expenses.txt"))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    let dirs = BaseDirs::new().ok_or_else(|| {
        ExpenseError::Config(format!(
            "Could not determine home directory; set {} instead",
            DIR_ENV_VAR
        ))
    })?;
    Ok(dirs.config_dir().join(APP_DIR_NAME))
}
