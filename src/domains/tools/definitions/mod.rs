//! Tool definitions module.
//!
//! One file per tool, grouped by service:
//! - `calc/` - calculator service tools
//! - `expense/` - expense tracker tools

pub mod calc;
pub mod common;
pub mod expense;

pub use calc::{AddParams, AddTool, RandomNumberParams, RandomNumberTool};
pub use expense::{
    AddExpenseParams, AddExpenseTool, DeleteExpenseParams, DeleteExpenseTool, EditExpenseParams,
    EditExpenseTool, ListExpenseRangeParams, ListExpenseRangeTool, ListExpensesParams,
    ListExpensesTool, SummarizeParams, SummarizeTool,
};
