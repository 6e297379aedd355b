//! Database operations for expenses.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{
        Expense, ExpenseAmount, ExpenseDate, ExpenseSearchResult, ExpenseTitle, NewExpense,
    },
};

/// Insert an expense and return it with its generated ID.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expenses (title, amount, category, date) VALUES (?1, ?2, ?3, ?4);",
        (
            expense.title.as_ref(),
            expense.amount.as_f64(),
            &expense.category,
            expense.date.as_ref(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(expense.with_id(id))
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a stored expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare("SELECT id, title, amount, category, date FROM expenses WHERE id = :id;")?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| error.into())
}

/// Check whether an expense with the ID `id` is stored, without reading its fields.
pub fn expense_exists(id: ExpenseId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM expenses WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Retrieve every expense in the order the database returns them.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, title, amount, category, date FROM expenses;")?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the title, amount, category and date of an expense.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if no row has the ID `id`.
pub fn update_expense(
    id: ExpenseId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE expenses SET title = ?1, amount = ?2, category = ?3, date = ?4 WHERE id = ?5",
        (
            expense.title.as_ref(),
            expense.amount.as_f64(),
            &expense.category,
            expense.date.as_ref(),
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::ExpenseNotFound(id));
    }

    Ok(())
}

/// Delete an expense by ID.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if no row has the ID `id`.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expenses WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::ExpenseNotFound(id));
    }

    Ok(())
}

/// Retrieve the expenses whose category equals `category`, ignoring ASCII case.
pub fn get_expenses_by_category(
    category: &str,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, title, amount, category, date FROM expenses
             WHERE LOWER(category) = LOWER(:category);",
        )?
        .query_map(&[(":category", &category)], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the expenses dated from `start` to `end`, inclusive.
///
/// Returns no expenses if `start` is after `end`.
pub fn get_expenses_in_date_range(
    start: ExpenseDate,
    end: ExpenseDate,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, title, amount, category, date FROM expenses
             WHERE date BETWEEN ?1 AND ?2;",
        )?
        .query_map((start.as_ref(), end.as_ref()), map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the expenses whose title or date contains `keyword`.
///
/// Matching uses SQLite's `LIKE`, so it ignores ASCII case and `%` or `_` in `keyword` act as
/// wildcards.
pub fn search_expenses(
    keyword: &str,
    connection: &Connection,
) -> Result<Vec<ExpenseSearchResult>, Error> {
    let pattern = format!("%{keyword}%");

    connection
        .prepare(
            "SELECT id, title, amount, date FROM expenses
             WHERE title LIKE ?1 OR date LIKE ?1;",
        )?
        .query_map([&pattern], map_search_row)?
        .map(|maybe_result| maybe_result.map_err(|error| error.into()))
        .collect()
}

/// Get the total number of expenses in the database.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expenses table.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_title: String = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let raw_date: String = row.get(4)?;

    Ok(Expense {
        id,
        title: ExpenseTitle::new_unchecked(&raw_title),
        amount: ExpenseAmount::new_unchecked(amount),
        category,
        date: ExpenseDate::new_unchecked(&raw_date),
    })
}

fn map_search_row(row: &Row) -> Result<ExpenseSearchResult, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_title: String = row.get(1)?;
    let amount = row.get(2)?;
    let raw_date: String = row.get(3)?;

    Ok(ExpenseSearchResult {
        id,
        title: ExpenseTitle::new_unchecked(&raw_title),
        amount: ExpenseAmount::new_unchecked(amount),
        date: ExpenseDate::new_unchecked(&raw_date),
    })
}
