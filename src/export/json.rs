//! JSON Export functionality
//!
//! Exports the full expense collection with schema versioning.

use std::io::Write;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One exported expense with its positional identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedExpense {
    pub id: usize,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDateTime,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub total_amount: f64,
    /// Earliest expense date
    pub earliest: Option<NaiveDateTime>,
    /// Latest expense date
    pub latest: Option<NaiveDateTime>,
}

/// Full collection export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub expenses: Vec<ExportedExpense>,

    pub metadata: ExportMetadata,
}

impl FullExport {
    /// Build an export of every stored expense
    pub fn from_storage(storage: &Storage) -> Self {
        Self::from_expenses(storage.expenses.get_all())
    }

    /// Build an export from an ordered slice of expenses
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            total_amount: expenses.iter().map(|e| e.amount).sum(),
            earliest: expenses.iter().map(|e| e.date).min(),
            latest: expenses.iter().map(|e| e.date).max(),
        };

        let expenses = expenses
            .iter()
            .enumerate()
            .map(|(id, e)| ExportedExpense {
                id,
                amount: e.amount,
                category: e.category.clone(),
                date: e.date,
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            metadata,
        }
    }
}

/// Export the collection to JSON
pub fn export_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_from_expenses_metadata() {
        let export = FullExport::from_expenses(&[
            Expense::new(10.0, "Food", date(5)),
            Expense::new(2.5, "Bus", date(2)),
            Expense::new(-1.0, "Refund", date(9)),
        ]);

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 3);
        assert_eq!(export.metadata.total_amount, 11.5);
        assert_eq!(export.metadata.earliest, Some(date(2)));
        assert_eq!(export.metadata.latest, Some(date(9)));
        assert_eq!(export.expenses[2].id, 2);
        assert_eq!(export.expenses[2].category, "Refund");
    }

    #[test]
    fn test_empty_export() {
        let export = FullExport::from_expenses(&[]);
        assert!(export.expenses.is_empty());
        assert!(export.metadata.earliest.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let export = FullExport::from_expenses(&[Expense::new(10.0, "Food", date(5))]);

        let json = serde_json::to_string_pretty(&export).unwrap();
        let back: FullExport = serde_json::from_str(&json).unwrap();

        assert_eq!(back.expenses, export.expenses);
        assert_eq!(back.app_version, env!("CARGO_PKG_VERSION"));
    }
}
