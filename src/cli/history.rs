//! CLI command for the audit trail

use crate::error::ExpenseResult;
use crate::storage::Storage;

/// Print the most recent `count` audit entries, oldest first
pub fn handle_history_command(storage: &Storage, count: usize) -> ExpenseResult<()> {
    let Some(logger) = storage.audit() else {
        println!("Audit log is disabled. Set \"audit_enabled\": true in the settings file.");
        return Ok(());
    };

    let entries = logger.read_recent(count)?;
    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
