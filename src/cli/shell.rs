//! Interactive menu shell
//!
//! A numbered menu over the expense service. Generic over its input and
//! output streams so it can be scripted in tests.

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::display::{format_amount, format_expense_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_amount, parse_date_time, Expense, ExpenseUpdate};
use crate::reports::{CategoryReport, MonthlySummary};
use crate::services::ExpenseService;
use crate::storage::Storage;

const MENU: &str = "\
--- Expense Tracker ---
1. Add Expense
2. View Total
3. Exit
4. Monthly Summary
5. Category Report
6. List All Expenses
7. Edit an Expense
8. Delete an Expense
";

/// Whether the shell keeps running after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu loop
pub struct Shell<'a, R, W> {
    storage: &'a mut Storage,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Create a shell reading commands from `input` and writing to `output`
    pub fn new(storage: &'a mut Storage, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            storage,
            settings,
            input,
            output,
        }
    }

    /// Run until the user chooses Exit or input ends
    ///
    /// Errors from an operation are reported and the menu continues. Only
    /// failures of the shell's own streams end the loop with an error.
    pub fn run(&mut self) -> ExpenseResult<()> {
        loop {
            write!(self.output, "\n{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            let result = match choice.trim() {
                "1" => self.add(),
                "2" => self.total(),
                "3" => Ok(Flow::Exit),
                "4" => self.monthly(),
                "5" => self.category_report(),
                "6" => self.list(),
                "7" => self.edit(),
                "8" => self.delete(),
                _ => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    Ok(Flow::Continue)
                }
            };

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e @ ExpenseError::Io(_)) => return Err(e),
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn add(&mut self) -> ExpenseResult<Flow> {
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(amount) = parse_amount(&amount) else {
            writeln!(self.output, "Invalid amount.")?;
            return Ok(Flow::Continue);
        };

        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Exit);
        };

        let date = chrono::Local::now().naive_local();
        ExpenseService::new(&mut *self.storage).add(amount, category, date)?;
        writeln!(self.output, "Expense added!")?;
        self.report_audit_error()?;
        Ok(Flow::Continue)
    }

    fn total(&mut self) -> ExpenseResult<Flow> {
        let total = self.storage.expenses.total();
        writeln!(
            self.output,
            "Total expenses: {}",
            format_amount(total, &self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn monthly(&mut self) -> ExpenseResult<Flow> {
        let Some(year) = self.prompt("Enter year (e.g., 2025): ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(year) = year.trim().parse::<i32>() else {
            writeln!(self.output, "Invalid year.")?;
            return Ok(Flow::Continue);
        };

        let Some(month) = self.prompt("Enter month (1-12): ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(month) = month.trim().parse::<u32>() else {
            writeln!(self.output, "Invalid month.")?;
            return Ok(Flow::Continue);
        };

        let summary = MonthlySummary::generate(&*self.storage, year, month)?;
        write!(
            self.output,
            "{}",
            summary.format_terminal(&self.settings.currency_symbol, &self.settings.date_format)
        )?;
        Ok(Flow::Continue)
    }

    fn category_report(&mut self) -> ExpenseResult<Flow> {
        let report = CategoryReport::generate(&*self.storage);
        write!(
            self.output,
            "{}",
            report.format_terminal(&self.settings.currency_symbol)
        )?;
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> ExpenseResult<Flow> {
        let listing: Vec<_> = self.storage.expenses.get_all().iter().enumerate().collect();
        write!(
            self.output,
            "{}",
            format_expense_list(
                &listing,
                &self.settings.currency_symbol,
                &self.settings.date_format
            )
        )?;
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> ExpenseResult<Flow> {
        let Some((index, current)) = self.select("Enter ID of expense to edit: ")? else {
            return Ok(Flow::Continue);
        };

        let mut update = ExpenseUpdate::new();

        let prompt = format!("New amount (current: {}, blank to keep): ", current.amount);
        let Some(amount) = self.prompt(&prompt)? else {
            return Ok(Flow::Exit);
        };
        if !amount.trim().is_empty() {
            let Ok(amount) = parse_amount(&amount) else {
                writeln!(self.output, "Invalid amount.")?;
                return Ok(Flow::Continue);
            };
            update = update.amount(amount);
        }

        let prompt = format!("New category (current: {}, blank to keep): ", current.category);
        let Some(category) = self.prompt(&prompt)? else {
            return Ok(Flow::Exit);
        };
        if !category.trim().is_empty() {
            update = update.category(category);
        }

        let prompt = format!(
            "New date (current: {}, YYYY-MM-DD, blank to keep): ",
            current.date.format(&self.settings.date_format)
        );
        let Some(date) = self.prompt(&prompt)? else {
            return Ok(Flow::Exit);
        };
        if !date.trim().is_empty() {
            let Ok(date) = parse_date_time(&date) else {
                writeln!(self.output, "Invalid date.")?;
                return Ok(Flow::Continue);
            };
            update = update.date(date);
        }

        if update.is_empty() {
            writeln!(self.output, "No changes made.")?;
            return Ok(Flow::Continue);
        }

        ExpenseService::new(&mut *self.storage).edit(index, update)?;
        writeln!(self.output, "Expense updated!")?;
        self.report_audit_error()?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> ExpenseResult<Flow> {
        let Some((index, _)) = self.select("Enter ID of expense to delete: ")? else {
            return Ok(Flow::Continue);
        };

        ExpenseService::new(&mut *self.storage).delete(index)?;
        writeln!(self.output, "Expense deleted!")?;
        self.report_audit_error()?;
        Ok(Flow::Continue)
    }

    fn report_audit_error(&mut self) -> ExpenseResult<()> {
        if let Some(e) = self.storage.take_audit_error() {
            writeln!(self.output, "Warning: not written to the audit log: {}", e)?;
        }
        Ok(())
    }

    /// Show the listing and ask for an ID
    ///
    /// Returns `None` when there is nothing to select, the input ended, or
    /// the answer was not a number. An out-of-range number is an error.
    fn select(&mut self, question: &str) -> ExpenseResult<Option<(usize, Expense)>> {
        if self.storage.expenses.is_empty() {
            writeln!(self.output, "No expenses recorded.")?;
            return Ok(None);
        }
        self.list()?;

        let Some(answer) = self.prompt(question)? else {
            return Ok(None);
        };
        let Ok(raw) = answer.trim().parse::<i64>() else {
            writeln!(self.output, "Invalid ID.")?;
            return Ok(None);
        };

        let service = ExpenseService::new(&mut *self.storage);
        let index = service.position(raw)?;
        let current = service.get(index)?.clone();
        Ok(Some((index, current)))
    }

    /// Print `question` and read one line without its terminator
    ///
    /// `None` means the input is exhausted.
    fn prompt(&mut self, question: &str) -> ExpenseResult<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpensePaths;
    use chrono::NaiveDate;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, &Settings::default()).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &mut Storage, items: &[(f64, &str, u32)]) {
        let mut service = ExpenseService::new(storage);
        for (amount, category, day) in items {
            let date = NaiveDate::from_ymd_opt(2025, 3, *day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap();
            service.add(*amount, *category, date).unwrap();
        }
    }

    fn run_script(storage: &mut Storage, script: &str) -> String {
        let settings = Settings::default();
        let mut output = Vec::new();
        Shell::new(storage, &settings, Cursor::new(script), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_option() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "3\n");
        assert!(out.contains("1. Add Expense"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_eof_exits_cleanly() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "");
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_add_and_total() {
        let (temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "1\n12.5\nFood\n1\n-2.5\nRefund\n2\n3\n");

        assert_eq!(out.matches("Expense added!").count(), 2);
        assert!(out.contains("Total expenses: $10.00"));
        assert_eq!(storage.expenses.count(), 2);
        assert_eq!(storage.expenses.get(1).unwrap().category, "Refund");

        let contents = fs::read_to_string(temp.path().join("expenses.txt")).unwrap();
        assert!(contents.starts_with("12.5,Food,"));
    }

    #[test]
    fn test_invalid_amount_skips_add() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "1\nabc\n3\n");

        assert!(out.contains("Invalid amount."));
        assert!(storage.expenses.is_empty());
    }

    #[test]
    fn test_category_with_comma_is_reported() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "1\n5\nFood, drinks\n3\n");

        assert!(out.contains("Error: "));
        assert!(out.contains("must not contain commas"));
        assert!(storage.expenses.is_empty());
    }

    #[test]
    fn test_audit_failure_keeps_session_running() {
        let (temp, mut storage) = create_test_storage();
        fs::create_dir(temp.path().join("audit.log")).unwrap();

        let out = run_script(&mut storage, "1\n5\nFood\n2\n3\n");

        assert!(out.contains("Expense added!"));
        assert!(out.contains("Warning: not written to the audit log"));
        assert!(out.contains("Total expenses: $5.00"));
        assert!(out.contains("Goodbye!"));
        assert_eq!(storage.expenses.count(), 1);
    }

    #[test]
    fn test_invalid_option() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "9\n3\n");
        assert!(out.contains("Invalid option. Try again."));
    }

    #[test]
    fn test_list() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(12.5, "Food", 15), (40.0, "Gas", 16)]);

        let out = run_script(&mut storage, "6\n3\n");
        assert!(out.contains("0: $12.50 - Food - 2025-03-15"));
        assert!(out.contains("1: $40.00 - Gas - 2025-03-16"));
    }

    #[test]
    fn test_monthly_summary() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(12.5, "Food", 15), (40.0, "Gas", 16)]);

        let out = run_script(&mut storage, "4\n2025\n3\n4\n2025\n4\n3\n");
        assert!(out.contains("Summary for 3/2025:"));
        assert!(out.contains("Total spent: $52.50"));
        assert!(out.contains("No expenses found for that month."));
    }

    #[test]
    fn test_monthly_out_of_range_month() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "4\n2025\n13\n3\n");
        assert!(out.contains("Error: "));
    }

    #[test]
    fn test_monthly_invalid_year() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "4\nnext\n3\n");
        assert!(out.contains("Invalid year."));
    }

    #[test]
    fn test_category_report() {
        let (_temp, mut storage) = create_test_storage();
        seed(
            &mut storage,
            &[(10.0, "A", 1), (30.0, "C", 2), (20.0, "A", 3), (50.0, "B", 4)],
        );

        let out = run_script(&mut storage, "5\n3\n");
        let rows: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("A ") || l.starts_with("B ") || l.starts_with("C "))
            .map(|l| &l[..1])
            .collect();
        assert_eq!(rows, vec!["B", "A", "C"]);
        assert!(out.contains("Top category: B ($50.00)"));
    }

    #[test]
    fn test_category_report_empty() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "5\n3\n");
        assert!(out.contains("No expenses recorded."));
    }

    #[test]
    fn test_edit_blank_keeps_values() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(12.5, "Food", 15)]);

        let out = run_script(&mut storage, "7\n0\n\nGroceries\n\n3\n");
        assert!(out.contains("Expense updated!"));

        let edited = storage.expenses.get(0).unwrap();
        assert_eq!(edited.amount, 12.5);
        assert_eq!(edited.category, "Groceries");
        assert_eq!(edited.day(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn test_edit_all_blank_changes_nothing() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(12.5, "Food", 15)]);

        let out = run_script(&mut storage, "7\n0\n\n\n\n3\n");
        assert!(out.contains("No changes made."));
    }

    #[test]
    fn test_edit_date() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(12.5, "Food", 15)]);

        run_script(&mut storage, "7\n0\n\n\n2024-12-31\n3\n");
        assert_eq!(
            storage.expenses.get(0).unwrap().day(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_edit_invalid_date_skips() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(12.5, "Food", 15)]);

        let out = run_script(&mut storage, "7\n0\n99\n\nnot-a-date\n3\n");
        assert!(out.contains("Invalid date."));
        assert_eq!(storage.expenses.get(0).unwrap().amount, 12.5);
    }

    #[test]
    fn test_edit_out_of_range() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(12.5, "Food", 15)]);

        let out = run_script(&mut storage, "7\n5\n3\n");
        assert!(out.contains("Error: No expense with ID 5"));
    }

    #[test]
    fn test_delete_shifts_ids() {
        let (_temp, mut storage) = create_test_storage();
        seed(
            &mut storage,
            &[(1.0, "A", 1), (2.0, "B", 2), (3.0, "C", 3)],
        );

        let out = run_script(&mut storage, "8\n0\n6\n3\n");
        assert!(out.contains("Expense deleted!"));
        assert!(out.contains("0: $2.00 - B"));
        assert!(out.contains("1: $3.00 - C"));
        assert_eq!(storage.expenses.count(), 2);
    }

    #[test]
    fn test_delete_negative_id() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(1.0, "A", 1)]);

        let out = run_script(&mut storage, "8\n-1\n3\n");
        assert!(out.contains("Error: No expense with ID -1"));
        assert_eq!(storage.expenses.count(), 1);
    }

    #[test]
    fn test_delete_non_numeric_id() {
        let (_temp, mut storage) = create_test_storage();
        seed(&mut storage, &[(1.0, "A", 1)]);

        let out = run_script(&mut storage, "8\nfirst\n3\n");
        assert!(out.contains("Invalid ID."));
        assert_eq!(storage.expenses.count(), 1);
    }

    #[test]
    fn test_delete_with_no_expenses() {
        let (_temp, mut storage) = create_test_storage();
        let out = run_script(&mut storage, "8\n3\n");
        assert!(out.contains("No expenses recorded."));
    }
}
