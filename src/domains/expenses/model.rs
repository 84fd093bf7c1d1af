//! Expense row and result types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A persisted expense row.
///
/// `date` is stored as text and never parsed; range queries compare it
/// lexically, so ISO-8601 (`YYYY-MM-DD`) is the only format that sorts right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Expense {
    /// Store-assigned identifier.
    pub id: i64,
    /// Expense date, e.g. `2024-01-31`.
    pub date: String,
    /// Amount spent.
    pub amount: f64,
    /// Top-level category.
    pub category: String,
    /// Optional subcategory (empty when unset).
    pub subcategory: String,
    /// Free-form note (empty when unset).
    pub note: String,
}

/// The caller-supplied fields of an expense, used for inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

impl ExpenseDraft {
    /// Draft with empty subcategory and note.
    pub fn new(date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
            subcategory: String::new(),
            note: String::new(),
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Per-category sum produced by a summary query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Sum of `amount` over the matching rows.
    pub total_amount: f64,
}

/// Whether a write matched a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MutationStatus {
    Success,
    NotFound,
}

/// Result of a create, update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MutationOutcome {
    /// `success` or `not_found`.
    pub status: MutationStatus,
    /// Id of the affected (or requested) row.
    pub id: i64,
}

impl MutationOutcome {
    pub fn success(id: i64) -> Self {
        Self {
            status: MutationStatus::Success,
            id,
        }
    }

    pub fn not_found(id: i64) -> Self {
        Self {
            status: MutationStatus::NotFound,
            id,
        }
    }

    /// Outcome for an UPDATE/DELETE that touched `affected` rows.
    pub fn from_affected(id: i64, affected: usize) -> Self {
        if affected == 0 {
            Self::not_found(id)
        } else {
            Self::success(id)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == MutationStatus::Success
    }
}
