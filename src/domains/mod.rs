//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools` - callable operations of both services
//! - `resources` - read-only documents fetched by URI
//! - `expenses` - SQLite persistence behind the expense tools

pub mod expenses;
pub mod resources;
pub mod tools;
