//! Expense repository for the line-oriented backing store
//!
//! Holds the ordered in-memory sequence of expenses and mirrors it to the
//! backing file. Order is insertion order, which is also file line order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryTotal, Expense};

use super::file_io::{read_lines, write_lines_atomic};

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: Vec<Expense>,
}

impl ExpenseRepository {
    /// Create a new, empty repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: Vec::new(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load expenses from disk, replacing the in-memory sequence
    ///
    /// A missing file yields an empty sequence. Blank lines at the end of
    /// the file are ignored; any other malformed line, blank ones included,
    /// fails the whole load and leaves the current sequence untouched.
    pub fn load(&mut self) -> ExpenseResult<&[Expense]> {
        let lines = read_lines(&self.path)?.unwrap_or_default();
        let end = lines
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |last| last + 1);

        let mut expenses = Vec::with_capacity(end);
        for (line_num, line) in lines[..end].iter().enumerate() {
            if line.trim().is_empty() {
                return Err(ExpenseError::parse("empty line").at_line(line_num + 1));
            }
            let expense = Expense::from_line(line).map_err(|e| e.at_line(line_num + 1))?;
            expenses.push(expense);
        }

        self.data = expenses;
        Ok(&self.data)
    }

    /// Rewrite the backing file from the current sequence
    pub fn save(&self) -> ExpenseResult<()> {
        write_snapshot(&self.path, &self.data)
    }

    /// Persist `expenses` as the new snapshot, then adopt it in memory
    ///
    /// If the write fails the previous file and the previous in-memory
    /// sequence are both kept.
    pub fn replace(&mut self, expenses: Vec<Expense>) -> ExpenseResult<()> {
        write_snapshot(&self.path, &expenses)?;
        self.data = expenses;
        Ok(())
    }

    /// All expenses in order
    pub fn get_all(&self) -> &[Expense] {
        &self.data
    }

    /// Expense at a position
    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.data.get(index)
    }

    /// Number of expenses
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// True if there are no expenses
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of all amounts
    pub fn total(&self) -> f64 {
        self.data.iter().map(|e| e.amount).sum()
    }

    /// Expenses dated in the given calendar month, in original order
    pub fn get_by_month(&self, year: i32, month: u32) -> Vec<Expense> {
        self.data
            .iter()
            .filter(|e| e.is_in_month(year, month))
            .cloned()
            .collect()
    }

    /// Group by exact category label, ordered by descending total
    ///
    /// Groups with equal totals keep the order in which their category was
    /// first seen.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        let mut groups: Vec<CategoryTotal> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for expense in &self.data {
            let pos = *positions
                .entry(expense.category.as_str())
                .or_insert_with(|| {
                    groups.push(CategoryTotal::new(expense.category.as_str()));
                    groups.len() - 1
                });
            groups[pos].add(expense.amount);
        }

        // sort_by is stable
        groups.sort_by(|a, b| b.total.total_cmp(&a.total));
        groups
    }
}

fn write_snapshot(path: &Path, expenses: &[Expense]) -> ExpenseResult<()> {
    write_lines_atomic(path, expenses.iter().map(Expense::to_line)).map_err(|e| match e {
        ExpenseError::Storage(msg) => ExpenseError::Storage(format!(
            "Failed to save expenses to {}: {}",
            path.display(),
            msg
        )),
        other => other,
    })
}
