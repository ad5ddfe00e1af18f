//! Reports module for the expense tracker
//!
//! Monthly summary and category breakdown.

pub mod category;
pub mod monthly;

pub use category::CategoryReport;
pub use monthly::MonthlySummary;
