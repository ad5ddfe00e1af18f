//! Service layer for the expense tracker
//!
//! The service layer provides validation and persistence rules on top of
//! the storage layer.

pub mod expense;

pub use expense::ExpenseService;
