//! Expense service
//!
//! The expense manager: add, edit, delete and query over the ordered
//! sequence, with a full rewrite of the backing store after every mutation.
//! Positional index is the only identifier, so deleting element `i` shifts
//! every later element down by one.
//!
//! The audit entry is written after the store rewrite. A failed audit write
//! does not fail the mutation; it is left on `Storage::take_audit_error`.

use chrono::NaiveDateTime;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{validate_category, CategoryTotal, Expense, ExpenseUpdate};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Reload the sequence from the backing store
    pub fn load(&mut self) -> ExpenseResult<&[Expense]> {
        self.storage.expenses.load()
    }

    /// Append a new expense and persist; returns its positional identifier
    pub fn add(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDateTime,
    ) -> ExpenseResult<usize> {
        let expense = Expense::new(amount, category, date);
        validate_amount(expense.amount)?;
        validate_category(&expense.category)?;

        let mut expenses = self.storage.expenses.get_all().to_vec();
        expenses.push(expense.clone());
        let index = expenses.len() - 1;

        self.storage.expenses.replace(expenses)?;
        self.storage.log_create(index, &expense);

        Ok(index)
    }

    /// Replace the fields present in `update` on the expense at `index`
    ///
    /// Returns the edited expense.
    pub fn edit(&mut self, index: usize, update: ExpenseUpdate) -> ExpenseResult<Expense> {
        let before = self.get(index)?.clone();

        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }
        if let Some(category) = &update.category {
            validate_category(category)?;
        }

        let after = before.apply(&update);
        let mut expenses = self.storage.expenses.get_all().to_vec();
        expenses[index] = after.clone();

        self.storage.expenses.replace(expenses)?;
        self.storage.log_update(index, &before, &after);

        Ok(after)
    }

    /// Remove the expense at `index`, shifting later expenses down by one
    ///
    /// Returns the removed expense.
    pub fn delete(&mut self, index: usize) -> ExpenseResult<Expense> {
        self.get(index)?;

        let mut expenses = self.storage.expenses.get_all().to_vec();
        let removed = expenses.remove(index);

        self.storage.expenses.replace(expenses)?;
        self.storage.log_delete(index, &removed);

        Ok(removed)
    }

    /// Expense at `index`, or an out-of-range error
    pub fn get(&self, index: usize) -> ExpenseResult<&Expense> {
        self.storage
            .expenses
            .get(index)
            .ok_or_else(|| ExpenseError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.storage.expenses.count(),
            })
    }

    /// Check a user-supplied identifier against `[0, len)`
    pub fn position(&self, raw: i64) -> ExpenseResult<usize> {
        let len = self.storage.expenses.count();
        usize::try_from(raw)
            .ok()
            .filter(|&i| i < len)
            .ok_or(ExpenseError::IndexOutOfRange { index: raw, len })
    }

    /// Every expense paired with its positional identifier
    pub fn list(&self) -> Vec<(usize, &Expense)> {
        self.storage.expenses.get_all().iter().enumerate().collect()
    }

    /// Number of expenses
    pub fn count(&self) -> usize {
        self.storage.expenses.count()
    }

    /// Sum of every amount
    pub fn total_amount(&self) -> f64 {
        self.storage.expenses.total()
    }

    /// Expenses dated in the given year and month, in original order
    pub fn monthly_expenses(&self, year: i32, month: u32) -> Vec<Expense> {
        self.storage.expenses.get_by_month(year, month)
    }

    /// Category groups by descending total; empty if there are no expenses
    pub fn category_report(&self) -> Vec<CategoryTotal> {
        self.storage.expenses.category_totals()
    }
}

fn validate_amount(amount: f64) -> ExpenseResult<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ExpenseError::Validation(format!(
            "amount must be a finite number, got {}",
            amount
        )))
    }
}
