//! YAML Export functionality
//!
//! Same document as the JSON export, in a human-readable form.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the collection to YAML
pub fn export_yaml<W: Write>(storage: &Storage, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage);
    write_yaml(&export, writer)
}

fn write_yaml<W: Write>(export: &FullExport, writer: &mut W) -> ExpenseResult<()> {
    let header = format!(
        "# Expense Tracker Export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export)?;
    Ok(())
}
