//! Expense records: domain types, SQL queries, the store abstraction and user-facing operations.

mod db;
mod domain;
mod operations;
mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use db::{
    count_expenses, create_expense, create_expense_table, delete_expense, expense_exists,
    get_all_expenses, get_expense, get_expenses_by_category, get_expenses_in_date_range,
    search_expenses, update_expense,
};
pub use domain::{
    Expense, ExpenseAmount, ExpenseDate, ExpenseForm, ExpenseSearchResult, ExpenseTitle,
    NewExpense,
};
pub use operations::{
    add_expense, delete_expense_by_id, ensure_expense_exists, filter_by_category,
    filter_by_date_range, list_expenses, search_by_keyword, update_expense_by_id,
};
pub use store::{ExpenseStore, SQLiteExpenseStore};
