//! Defines the app level error types.

use crate::database_id::ExpenseId;

/// Input that was rejected before the database was touched.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ValidationError {
    /// The title was empty or only contained whitespace.
    #[error("Title can't be empty")]
    EmptyTitle,

    /// The amount was zero, negative or not a finite number.
    #[error("Amount must be greater than 0, got {0}")]
    NonPositiveAmount(f64),

    /// The date string was not a real calendar date in the form `YYYY-MM-DD`.
    #[error("Date format should be YYYY-MM-DD, got \"{0}\"")]
    InvalidDate(String),

    /// The start of a date range was not a valid `YYYY-MM-DD` date.
    #[error("Invalid start date format \"{0}\"")]
    InvalidStartDate(String),

    /// The end of a date range was not a valid `YYYY-MM-DD` date.
    #[error("Invalid end date format \"{0}\"")]
    InvalidEndDate(String),

    /// The category to filter by was empty after trimming.
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// The search keyword was empty after trimming.
    #[error("Keyword cannot be empty")]
    EmptyKeyword,

    /// The text typed at the amount prompt was not a number.
    #[error("Amount must be a number, got \"{0}\"")]
    InvalidAmountInput(String),

    /// The text typed at the ID prompt was not an integer.
    #[error("Expense ID must be a whole number, got \"{0}\"")]
    InvalidIdInput(String),
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user's input failed validation. Nothing was written.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// No expense exists with the given ID.
    #[error("No record found with ID {0}")]
    ExpenseNotFound(ExpenseId),

    /// A query returned no rows.
    ///
    /// Operations that look up a single expense replace this with
    /// [Error::ExpenseNotFound] so the ID can be reported.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("Database error: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
