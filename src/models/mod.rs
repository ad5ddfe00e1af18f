//! Core data models for the expense tracker
//!
//! An expense record, the optional-field update applied on edit, and the
//! per-category aggregate used by reports.

pub mod category;
pub mod expense;

pub use category::CategoryTotal;
pub use expense::{parse_amount, parse_date_time, validate_category, Expense, ExpenseUpdate};
