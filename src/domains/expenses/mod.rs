//! Expenses domain module.
//!
//! Persistence for the expense tracker: a single `expenses` table in a local
//! SQLite file. Every store operation opens its own connection and runs
//! exactly one statement, so each call is atomic under SQLite autocommit.
//!
//! - `model.rs` - Row and result types shared with the tools
//! - `store.rs` - SQL operations
//! - `error.rs` - Storage error types

mod error;
mod model;
mod store;

pub use error::{StoreError, StoreResult};
pub use model::{CategoryTotal, Expense, ExpenseDraft, MutationOutcome, MutationStatus};
pub use store::ExpenseStore;
