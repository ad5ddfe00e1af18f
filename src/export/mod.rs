//! Export module for the expense tracker
//!
//! Exports the expense collection in multiple formats:
//! - CSV: spreadsheet-compatible, properly quoted
//! - JSON: machine-readable, with schema version and metadata
//! - YAML: human-readable form of the JSON document

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_json, ExportedExpense, FullExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_yaml;
