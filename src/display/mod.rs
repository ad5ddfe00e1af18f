//! Display formatting for terminal output
//!
//! Formatting helpers shared by the CLI commands, the interactive shell,
//! and the reports.

pub mod expense;
pub mod report;

pub use expense::{format_amount, format_expense_details, format_expense_list, format_expense_row};
