//! Audit logging system for the expense tracker
//!
//! Records every add, edit and delete with before/after values in an
//! append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single log entry with timestamp, operation, the
//!   positional identifier of the expense, and optional before/after values.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//! - `generate_diff`: human-readable summary of changed fields.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(0, &expense);
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
