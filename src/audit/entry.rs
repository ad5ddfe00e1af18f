//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types,
//! entity types, and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Expense,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// Positional identifier at the time of the operation, e.g. `#3`
    pub entity_id: String,

    /// Category of the affected expense
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// The expense before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The expense after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

fn entity_id(index: usize) -> String {
    format!("#{}", index)
}

impl AuditEntry {
    /// Entry for an expense appended at `index`
    pub fn create(index: usize, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type: EntityType::Expense,
            entity_id: entity_id(index),
            entity_name: Some(expense.category.clone()),
            before: None,
            after: serde_json::to_value(expense).ok(),
            diff_summary: None,
        }
    }

    /// Entry for an expense at `index` replaced by an edited value
    pub fn update(index: usize, before: &Expense, after: &Expense) -> Self {
        let before = serde_json::to_value(before).ok();
        let after_value = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type: EntityType::Expense,
            entity_id: entity_id(index),
            entity_name: Some(after.category.clone()),
            before,
            after: after_value,
            diff_summary,
        }
    }

    /// Entry for an expense removed from `index`
    pub fn delete(index: usize, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type: EntityType::Expense,
            entity_id: entity_id(index),
            entity_name: Some(expense.category.clone()),
            before: serde_json::to_value(expense).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
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
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(4, &sample(12.5, "Food"));

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Expense);
        assert_eq!(entry.entity_id, "#4");
        assert_eq!(entry.entity_name.as_deref(), Some("Food"));
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().unwrap()["amount"], 12.5);
    }

    #[test]
    fn test_update_entry_has_diff() {
        let entry = AuditEntry::update(0, &sample(12.5, "Misc"), &sample(12.5, "Food"));

        assert_eq!(entry.operation, Operation::Update);
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("category: \"Misc\" -> \"Food\"")
        );
    }

    #[test]
    fn test_update_without_changes_has_no_diff() {
        let expense = sample(1.0, "Food");
        let entry = AuditEntry::update(0, &expense, &expense);
        assert!(entry.diff_summary.is_none());
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(2, &sample(5.0, "Bus"));

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(0, &sample(1.0, "Food"));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"create\""));
        assert!(json.contains("\"entity_type\":\"expense\""));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Create);
        assert_eq!(deserialized.entity_id, "#0");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(1, &sample(1.0, "Misc"), &sample(2.0, "Misc"));

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE Expense #1 (Misc)"));
        assert!(formatted.contains("Changes: amount: 1.0 -> 2.0"));
    }
}
