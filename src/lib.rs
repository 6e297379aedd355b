//! A personal expense tracker for the command line.
//!
//! Expenses are kept in a local SQLite database and managed through an interactive menu:
//! add, view, update and delete records, filter them by category or date range, and search
//! them by keyword.
//!
//! The [expense] operations take any [ExpenseStore](expense::ExpenseStore) and return typed
//! results, while the [shell] owns all console input and output.

#![warn(missing_docs)]

mod database_id;
mod db;
mod error;
mod logging;

pub mod expense;
pub mod shell;

pub use database_id::{DatabaseId, ExpenseId};
pub use db::initialize as initialize_db;
pub use error::{Error, ValidationError};
pub use logging::{DEFAULT_LOG_FILTER, setup_logging};
