//! Expense Tracker - a single-user expense log for the terminal
//!
//! Records expenses (amount, category, date) in a plain text file, one
//! expense per line, and answers totals, monthly summaries and category
//! breakdowns over them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: The expense record and per-category aggregates
//! - `storage`: Line-oriented backing store with atomic rewrites
//! - `services`: The expense manager (add, edit, delete, queries)
//! - `reports`: Monthly summary and category report
//! - `audit`: Append-only audit trail of mutations
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths, &settings)?;
//! storage.load_all()?;
//!
//! let mut service = ExpenseService::new(&mut storage);
//! let id = service.add(12.5, "Food", chrono::Local::now().naive_local())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
