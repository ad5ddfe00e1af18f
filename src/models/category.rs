//! Per-category aggregate
//!
//! One row of the category report: every expense sharing an exact category
//! label, summed.

use serde::{Deserialize, Serialize};

/// Total and count of expenses sharing one category label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

impl CategoryTotal {
    /// Start an empty group for a category
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            total: 0.0,
            count: 0,
        }
    }

    /// Fold one amount into the group
    pub fn add(&mut self, amount: f64) {
        self.total += amount;
        self.count += 1;
    }
}
