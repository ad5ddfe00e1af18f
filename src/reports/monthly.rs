//! Monthly Summary
//!
//! Every expense dated in one calendar month, with the month's total.

use chrono::NaiveDate;

use crate::display::expense::format_amount;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::storage::Storage;

/// Expenses for one calendar month
#[derive(Debug, Clone)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// Matching expenses in original order
    pub expenses: Vec<Expense>,
    pub total: f64,
}

impl MonthlySummary {
    /// Generate the summary for `year`/`month` (month is 1-12)
    pub fn generate(storage: &Storage, year: i32, month: u32) -> ExpenseResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ExpenseError::Validation(format!(
                "invalid month {}/{} (month must be 1-12)",
                month, year
            )));
        }

        let expenses = storage.expenses.get_by_month(year, month);
        let total = expenses.iter().map(|e| e.amount).sum();

        Ok(Self {
            year,
            month,
            expenses,
            total,
        })
    }

    /// Number of matching expenses
    pub fn count(&self) -> usize {
        self.expenses.len()
    }

    /// True if nothing was spent in the month
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str, date_format: &str) -> String {
        if self.is_empty() {
            return "No expenses found for that month.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!("Summary for {}/{}:\n", self.month, self.year));
        output.push_str(&format!(
            "Total spent: {}\n",
            format_amount(self.total, currency)
        ));
        output.push_str("\nBreakdown:\n");

        for expense in &self.expenses {
            output.push_str(&format!(
                "{} - {} - {}\n",
                expense.date.format(date_format),
                expense.category,
                format_amount(expense.amount, currency)
            ));
        }

        output
    }
}
