//! Storage layer for the expense tracker
//!
//! Provides the line-oriented backing store with atomic writes, plus the
//! audit trail hooks used after each successful mutation.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseRepository;
pub use file_io::{write_json_atomic, write_lines_atomic};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::ExpensePaths;
use crate::config::settings::Settings;
use crate::error::ExpenseError;
use crate::models::Expense;

/// Main storage coordinator
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    audit: Option<AuditLogger>,
    audit_error: Option<ExpenseError>,
}

impl Storage {
    /// Create a new Storage instance with auditing per `settings`
    pub fn new(paths: ExpensePaths, settings: &Settings) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit,
            audit_error: None,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.expenses.load()?;
        Ok(())
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record a created expense
    pub fn log_create(&mut self, index: usize, expense: &Expense) {
        self.log(|| AuditEntry::create(index, expense));
    }

    /// Record an edited expense
    pub fn log_update(&mut self, index: usize, before: &Expense, after: &Expense) {
        self.log(|| AuditEntry::update(index, before, after));
    }

    /// Record a deleted expense
    pub fn log_delete(&mut self, index: usize, expense: &Expense) {
        self.log(|| AuditEntry::delete(index, expense));
    }

    /// The most recent audit write failure, cleared on read
    ///
    /// Audit writes happen after the store is saved, so a failure never
    /// undoes the change it describes.
    pub fn take_audit_error(&mut self) -> Option<ExpenseError> {
        self.audit_error.take()
    }

    fn log<F: FnOnce() -> AuditEntry>(&mut self, entry: F) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry()) {
                self.audit_error = Some(e);
            }
        }
    }
}
