//! Calculator tools: `add` and `random_number`.

pub mod add;
pub mod random_number;

pub use add::{AddParams, AddTool};
pub use random_number::{RandomNumberParams, RandomNumberTool, random_integer};
