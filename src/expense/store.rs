//! Defines the expense store trait and an implementation for the SQLite backend.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{
        Expense, ExpenseDate, ExpenseSearchResult, NewExpense, create_expense, delete_expense,
        expense_exists, get_all_expenses, get_expense, get_expenses_by_category,
        get_expenses_in_date_range, search_expenses, update_expense,
    },
    initialize_db,
};

/// Handles the creation, retrieval, modification and removal of expenses.
pub trait ExpenseStore {
    /// Store a new expense and return it with its assigned ID.
    fn create(&mut self, expense: NewExpense) -> Result<Expense, Error>;

    /// Retrieve an expense by ID, or [Error::NotFound] if there is none.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error>;

    /// Check whether an expense with the ID `id` is stored.
    fn exists(&self, id: ExpenseId) -> Result<bool, Error>;

    /// Retrieve every expense in the order they are stored.
    fn get_all(&self) -> Result<Vec<Expense>, Error>;

    /// Overwrite every mutable field of the expense `id`.
    fn update(&mut self, id: ExpenseId, expense: NewExpense) -> Result<(), Error>;

    /// Remove the expense `id`.
    fn delete(&mut self, id: ExpenseId) -> Result<(), Error>;

    /// Retrieve the expenses whose category equals `category`, ignoring case.
    fn filter_by_category(&self, category: &str) -> Result<Vec<Expense>, Error>;

    /// Retrieve the expenses dated within `start..=end`.
    fn filter_by_date_range(
        &self,
        start: ExpenseDate,
        end: ExpenseDate,
    ) -> Result<Vec<Expense>, Error>;

    /// Retrieve the expenses whose title or date contains `keyword`.
    fn search(&self, keyword: &str) -> Result<Vec<ExpenseSearchResult>, Error>;
}

/// Stores expenses in a SQLite database file.
///
/// A new connection is opened for every call and closed before the call returns, so no handle
/// is held between operations. The `expenses` table must already exist, see
/// [SQLiteExpenseStore::initialize].
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    db_path: PathBuf,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite database at `db_path`.
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// The path of the database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Create the `expenses` table if it does not exist yet.
    pub fn initialize(&self) -> Result<(), Error> {
        let connection = self.connect()?;
        initialize_db(&connection)?;
        tracing::info!("Initialized expense database at {:?}", self.db_path);

        Ok(())
    }

    fn connect(&self) -> Result<Connection, Error> {
        tracing::debug!("Opening database connection to {:?}", self.db_path);
        Ok(Connection::open(&self.db_path)?)
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    fn create(&mut self, expense: NewExpense) -> Result<Expense, Error> {
        let connection = self.connect()?;
        create_expense(expense, &connection)
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        let connection = self.connect()?;
        get_expense(id, &connection)
    }

    fn exists(&self, id: ExpenseId) -> Result<bool, Error> {
        let connection = self.connect()?;
        expense_exists(id, &connection)
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        let connection = self.connect()?;
        get_all_expenses(&connection)
    }

    fn update(&mut self, id: ExpenseId, expense: NewExpense) -> Result<(), Error> {
        let connection = self.connect()?;
        update_expense(id, expense, &connection)
    }

    fn delete(&mut self, id: ExpenseId) -> Result<(), Error> {
        let connection = self.connect()?;
        delete_expense(id, &connection)
    }

    fn filter_by_category(&self, category: &str) -> Result<Vec<Expense>, Error> {
        let connection = self.connect()?;
        get_expenses_by_category(category, &connection)
    }

    fn filter_by_date_range(
        &self,
        start: ExpenseDate,
        end: ExpenseDate,
    ) -> Result<Vec<Expense>, Error> {
        let connection = self.connect()?;
        get_expenses_in_date_range(start, end, &connection)
    }

    fn search(&self, keyword: &str) -> Result<Vec<ExpenseSearchResult>, Error> {
        let connection = self.connect()?;
        search_expenses(keyword, &connection)
    }
}
