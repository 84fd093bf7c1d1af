//! Expense tracker tools.
//!
//! Each tool wraps exactly one [`ExpenseStore`](crate::domains::expenses::ExpenseStore)
//! call. Tool names are part of the public protocol and must not change.

pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod list_range;
pub mod summarize;

pub use add::{AddExpenseParams, AddExpenseTool};
pub use delete::{DeleteExpenseParams, DeleteExpenseTool};
pub use edit::{EditExpenseParams, EditExpenseTool};
pub use list::{ListExpensesParams, ListExpensesTool};
pub use list_range::{ListExpenseRangeParams, ListExpenseRangeTool};
pub use summarize::{SummarizeParams, SummarizeTool};
