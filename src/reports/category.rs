//! Category Report
//!
//! Groups every expense by exact category label, ordered by descending
//! total.

use crate::display::expense::format_amount;
use crate::display::report::{format_bar, format_percentage, separator};
use crate::models::CategoryTotal;
use crate::storage::Storage;

const BAR_WIDTH: usize = 20;

/// Category breakdown over all expenses
#[derive(Debug, Clone)]
pub struct CategoryReport {
    /// Groups by descending total, ties in first-seen order
    pub categories: Vec<CategoryTotal>,
    /// Sum over all groups
    pub grand_total: f64,
    /// Number of expenses counted
    pub expense_count: usize,
}

impl CategoryReport {
    /// Generate the report over every stored expense
    pub fn generate(storage: &Storage) -> Self {
        Self::from_totals(storage.expenses.category_totals())
    }

    /// Build a report from already-ordered category totals
    pub fn from_totals(categories: Vec<CategoryTotal>) -> Self {
        let grand_total = categories.iter().map(|c| c.total).sum();
        let expense_count = categories.iter().map(|c| c.count).sum();
        Self {
            categories,
            grand_total,
            expense_count,
        }
    }

    /// True if there were no expenses to group
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The group with the highest total, if any
    pub fn top(&self) -> Option<&CategoryTotal> {
        self.categories.first()
    }

    /// Percentage of the grand total taken by `row`
    pub fn share(&self, row: &CategoryTotal) -> Option<f64> {
        if self.grand_total == 0.0 {
            None
        } else {
            Some(row.total / self.grand_total * 100.0)
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let Some(top) = self.top() else {
            return "No expenses recorded.\n".to_string();
        };

        let max_total = self
            .categories
            .iter()
            .map(|c| c.total)
            .fold(0.0_f64, f64::max);

        let mut output = String::new();
        output.push_str("--- Category Report ---\n");
        output.push_str(&format!(
            "{:<20} {:>12} {:>6} {:>6}  {}\n",
            "Category", "Total", "Count", "%", ""
        ));
        output.push_str(&separator(70));
        output.push('\n');

        for row in &self.categories {
            let pct = self
                .share(row)
                .map(format_percentage)
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "{:<20} {:>12} {:>6} {:>6}  {}\n",
                row.category,
                format_amount(row.total, currency),
                row.count,
                pct,
                format_bar(row.total, max_total, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>6}\n",
            "TOTAL",
            format_amount(self.grand_total, currency),
            self.expense_count
        ));
        output.push_str(&format!(
            "\nTop category: {} ({})\n",
            top.category,
            format_amount(top.total, currency)
        ));

        output
    }
}
