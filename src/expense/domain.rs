//! Core expense domain types and the validation rules for their fields.

use std::fmt::Display;

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{ValidationError, database_id::ExpenseId};

/// The only accepted date layout, e.g. `2024-01-15`.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A validated, non-empty expense title.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExpenseTitle(String);

impl ExpenseTitle {
    /// Create an expense title from `title` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return a [ValidationError::EmptyTitle] if `title` is empty or only
    /// whitespace.
    pub fn new(title: &str) -> Result<Self, ValidationError> {
        let title = title.trim();

        if title.is_empty() {
            Err(ValidationError::EmptyTitle)
        } else {
            Ok(Self(title.to_string()))
        }
    }

    /// Create an expense title without validation.
    ///
    /// The caller should ensure that the string is not empty. Used for rows read back from the
    /// database, which were validated when they were written.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl AsRef<str> for ExpenseTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated amount of money, always finite and greater than zero.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ExpenseAmount(f64);

impl ExpenseAmount {
    /// Create an expense amount.
    ///
    /// # Errors
    ///
    /// This function will return a [ValidationError::NonPositiveAmount] if `amount` is zero,
    /// negative, NaN or infinite.
    pub fn new(amount: f64) -> Result<Self, ValidationError> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(ValidationError::NonPositiveAmount(amount))
        }
    }

    /// Create an expense amount without validation.
    pub fn new_unchecked(amount: f64) -> Self {
        Self(amount)
    }

    /// The amount as a plain float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Display for ExpenseAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A calendar date held as `YYYY-MM-DD` text.
///
/// Dates are compared as text, the same way the database compares them, which gives date
/// order for zero-padded ISO dates. Dates typed by the user go through [ExpenseDate::parse];
/// dates read back from the database are kept exactly as stored.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseDate(String);

impl ExpenseDate {
    /// Parse a date in the exact form `YYYY-MM-DD`.
    ///
    /// Surrounding whitespace is not allowed, month and day must be zero padded, and the date
    /// must exist in the calendar (`2023-02-29` is rejected).
    ///
    /// # Errors
    ///
    /// This function will return a [ValidationError::InvalidDate] holding the original text if
    /// it cannot be parsed.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        if text.len() != 10 || Date::parse(text, DATE_FORMAT).is_err() {
            return Err(ValidationError::InvalidDate(text.to_owned()));
        }

        Ok(Self(text.to_owned()))
    }

    /// Wrap stored date text without validation.
    ///
    /// Rows already in the database are trusted, even if their date is not zero padded.
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl From<Date> for ExpenseDate {
    fn from(date: Date) -> Self {
        Self(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        ))
    }
}

impl AsRef<str> for ExpenseDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single spending record.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// Assigned by the database on insert.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub title: ExpenseTitle,
    /// How much was spent.
    pub amount: ExpenseAmount,
    /// Free-form label, e.g. "Food" or "Transport". Matched case-insensitively when filtering.
    pub category: String,
    /// The day the money was spent.
    pub date: ExpenseDate,
}

/// The validated fields of an expense that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// See [Expense::title].
    pub title: ExpenseTitle,
    /// See [Expense::amount].
    pub amount: ExpenseAmount,
    /// See [Expense::category].
    pub category: String,
    /// See [Expense::date].
    pub date: ExpenseDate,
}

impl NewExpense {
    /// Validate the raw fields of `form`.
    ///
    /// Fields are checked in the order title, amount, date and the first failure is returned.
    /// The category is taken as is.
    pub fn from_form(form: &ExpenseForm) -> Result<Self, ValidationError> {
        let title = ExpenseTitle::new(&form.title)?;
        let amount = ExpenseAmount::new(form.amount)?;
        let date = ExpenseDate::parse(&form.date)?;

        Ok(Self {
            title,
            amount,
            category: form.category.clone(),
            date,
        })
    }

    /// Attach a database ID.
    pub fn with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// Unvalidated user input for adding or updating an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    /// Must contain something other than whitespace.
    pub title: String,
    /// Must be greater than zero.
    pub amount: f64,
    /// Taken as is.
    pub category: String,
    /// Must be a real date written as `YYYY-MM-DD`.
    pub date: String,
}

/// A row returned by keyword search.
///
/// Search results only carry the columns the search selects, which does not include the
/// category.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSearchResult {
    /// See [Expense::id].
    pub id: ExpenseId,
    /// See [Expense::title].
    pub title: ExpenseTitle,
    /// See [Expense::amount].
    pub amount: ExpenseAmount,
    /// See [Expense::date].
    pub date: ExpenseDate,
}

impl From<Expense> for ExpenseSearchResult {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            title: expense.title,
            amount: expense.amount,
            date: expense.date,
        }
    }
}
