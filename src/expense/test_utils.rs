use std::cell::Cell;

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{Expense, ExpenseDate, ExpenseSearchResult, ExpenseStore, NewExpense},
};

/// An [ExpenseStore] that keeps expenses in a `Vec`.
///
/// Mirrors the SQLite store: IDs start at 1, rows are returned in insertion order, and text
/// matching ignores ASCII case. Every call is counted so tests can check that rejected input
/// never reached the store.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    expenses: Vec<Expense>,
    next_id: ExpenseId,
    queries: Cell<usize>,
    failing: bool,
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// A store where every call fails with an SQL error, as if the table were missing.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// The number of calls made to the store so far.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    fn begin(&self) -> Result<(), Error> {
        self.queries.set(self.queries.get() + 1);

        if self.failing {
            Err(Error::SqlError(rusqlite::Error::InvalidQuery))
        } else {
            Ok(())
        }
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn create(&mut self, expense: NewExpense) -> Result<Expense, Error> {
        self.begin()?;

        let expense = expense.with_id(self.next_id);
        self.next_id += 1;
        self.expenses.push(expense.clone());

        Ok(expense)
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        self.begin()?;

        self.expenses
            .iter()
            .find(|expense| expense.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn exists(&self, id: ExpenseId) -> Result<bool, Error> {
        self.begin()?;

        Ok(self.expenses.iter().any(|expense| expense.id == id))
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        self.begin()?;

        Ok(self.expenses.clone())
    }

    fn update(&mut self, id: ExpenseId, expense: NewExpense) -> Result<(), Error> {
        self.begin()?;

        let stored = self
            .expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or(Error::ExpenseNotFound(id))?;
        *stored = expense.with_id(id);

        Ok(())
    }

    fn delete(&mut self, id: ExpenseId) -> Result<(), Error> {
        self.begin()?;

        let count_before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);

        if self.expenses.len() == count_before {
            return Err(Error::ExpenseNotFound(id));
        }

        Ok(())
    }

    fn filter_by_category(&self, category: &str) -> Result<Vec<Expense>, Error> {
        self.begin()?;

        Ok(self
            .expenses
            .iter()
            .filter(|expense| expense.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect())
    }

    fn filter_by_date_range(
        &self,
        start: ExpenseDate,
        end: ExpenseDate,
    ) -> Result<Vec<Expense>, Error> {
        self.begin()?;

        Ok(self
            .expenses
            .iter()
            .filter(|expense| start <= expense.date && expense.date <= end)
            .cloned()
            .collect())
    }

    fn search(&self, keyword: &str) -> Result<Vec<ExpenseSearchResult>, Error> {
        self.begin()?;

        let keyword = keyword.to_ascii_lowercase();

        Ok(self
            .expenses
            .iter()
            .filter(|expense| {
                expense.title.as_ref().to_ascii_lowercase().contains(&keyword)
                    || expense.date.to_string().contains(&keyword)
            })
            .cloned()
            .map(ExpenseSearchResult::from)
            .collect())
    }
}
