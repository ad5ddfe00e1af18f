//! Expense display formatting
//!
//! Formats amounts and the positional expense listing for the terminal.

use crate::models::Expense;

/// Format an amount with a currency symbol and two decimals, e.g. `-$3.50`
pub fn format_amount(amount: f64, currency: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", currency, -amount)
    } else {
        format!("{}{:.2}", currency, amount)
    }
}

/// Format one listing row: `<id>: <amount> - <category> - <date>`
pub fn format_expense_row(
    index: usize,
    expense: &Expense,
    currency: &str,
    date_format: &str,
) -> String {
    format!(
        "{}: {} - {} - {}",
        index,
        format_amount(expense.amount, currency),
        expense.category,
        expense.date.format(date_format)
    )
}

/// Format the full positional listing
pub fn format_expense_list(
    expenses: &[(usize, &Expense)],
    currency: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::from("--- All Expenses ---\n");
    for (index, expense) in expenses {
        output.push_str(&format_expense_row(*index, expense, currency, date_format));
        output.push('\n');
    }
    output
}

/// Format a single expense in detail
pub fn format_expense_details(index: usize, expense: &Expense, currency: &str) -> String {
    format!(
        "ID:       {}\nAmount:   {}\nCategory: {}\nDate:     {}\n",
        index,
        format_amount(expense.amount, currency),
        expense.category,
        expense.date.format("%Y-%m-%d %H:%M:%S")
    )
}
