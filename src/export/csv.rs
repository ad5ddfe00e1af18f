//! CSV Export functionality
//!
//! Unlike the backing store, fields are quoted, so categories containing
//! commas survive the export.

use std::io::Write;

use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::Expense;
use crate::storage::Storage;

#[derive(Serialize)]
struct CsvRow<'a> {
    id: usize,
    date: String,
    category: &'a str,
    amount: f64,
}

/// Export every stored expense to CSV
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<()> {
    write_csv(storage.expenses.get_all(), writer)
}

fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if expenses.is_empty() {
        csv_writer.write_record(["id", "date", "category", "amount"])?;
    }

    for (id, expense) in expenses.iter().enumerate() {
        csv_writer.serialize(CsvRow {
            id,
            date: expense.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            category: &expense.category,
            amount: expense.amount,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(amount: f64, category: &str) -> Expense {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        Expense::new(amount, category, date)
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut buffer = Vec::new();
        write_csv(&[sample(12.5, "Food"), sample(3.0, "Bus")], &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "id,date,category,amount");
        assert_eq!(lines[1], "0,2025-03-15 14:30:00,Food,12.5");
        assert_eq!(lines[2], "1,2025-03-15 14:30:00,Bus,3.0");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let mut buffer = Vec::new();
        write_csv(&[sample(1.0, "Food, Drinks")], &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"Food, Drinks\""));
    }

    #[test]
    fn test_csv_empty_has_header() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "id,date,category,amount\n");
    }
}
