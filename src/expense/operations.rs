//! The expense operations offered to users.
//!
//! Each operation validates its raw input before touching the store, so a rejected request
//! never reaches the database. Results are returned to the caller rather than printed.

use crate::{
    Error, ValidationError,
    database_id::ExpenseId,
    expense::{Expense, ExpenseDate, ExpenseForm, ExpenseSearchResult, ExpenseStore, NewExpense},
};

/// Validate `form` and store it as a new expense.
///
/// # Errors
/// This function will return a:
/// - [Error::Invalid] if the title, amount or date is invalid (checked in that order),
/// - or [Error::SqlError] if the expense could not be written.
pub fn add_expense(form: &ExpenseForm, store: &mut impl ExpenseStore) -> Result<Expense, Error> {
    let new_expense = NewExpense::from_form(form).inspect_err(|error| {
        tracing::warn!("Rejected new expense: {error}");
    })?;

    let expense = store.create(new_expense)?;
    tracing::info!("Added expense {}", expense.id);

    Ok(expense)
}

/// Get every stored expense.
pub fn list_expenses(store: &impl ExpenseStore) -> Result<Vec<Expense>, Error> {
    store.get_all()
}

/// Delete the expense `id` after checking that it exists.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if there is no expense with the ID `id`.
pub fn delete_expense_by_id(id: ExpenseId, store: &mut impl ExpenseStore) -> Result<(), Error> {
    ensure_expense_exists(id, store)?;
    store.delete(id)?;
    tracing::info!("Deleted expense {id}");

    Ok(())
}

/// Replace the title, amount, category and date of the expense `id`.
///
/// The expense must exist before the new values are validated. Validation stops at the first
/// invalid field and nothing is written unless every field is valid.
///
/// # Errors
/// This function will return a:
/// - [Error::ExpenseNotFound] if there is no expense with the ID `id`,
/// - [Error::Invalid] if the new title, amount or date is invalid,
/// - or [Error::SqlError] if there is some SQL error.
pub fn update_expense_by_id(
    id: ExpenseId,
    form: &ExpenseForm,
    store: &mut impl ExpenseStore,
) -> Result<Expense, Error> {
    ensure_expense_exists(id, store)?;

    let new_expense = NewExpense::from_form(form).inspect_err(|error| {
        tracing::warn!("Rejected update to expense {id}: {error}");
    })?;

    store.update(id, new_expense.clone())?;
    tracing::info!("Updated expense {id}");

    Ok(new_expense.with_id(id))
}

/// Get the expenses in `category`, ignoring case and surrounding whitespace.
///
/// # Errors
/// Returns [ValidationError::EmptyCategory] without querying the store if `category` is blank.
pub fn filter_by_category(
    category: &str,
    store: &impl ExpenseStore,
) -> Result<Vec<Expense>, Error> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::EmptyCategory.into());
    }

    tracing::debug!("Filtering expenses by category {category:?}");
    store.filter_by_category(category)
}

/// Get the expenses dated between `start` and `end`, including both days.
///
/// # Errors
/// Returns [ValidationError::InvalidStartDate] or [ValidationError::InvalidEndDate] if either
/// date is not in the form `YYYY-MM-DD`. The start date is checked first.
pub fn filter_by_date_range(
    start: &str,
    end: &str,
    store: &impl ExpenseStore,
) -> Result<Vec<Expense>, Error> {
    let start_date = ExpenseDate::parse(start)
        .map_err(|_| ValidationError::InvalidStartDate(start.to_owned()))?;
    let end_date =
        ExpenseDate::parse(end).map_err(|_| ValidationError::InvalidEndDate(end.to_owned()))?;

    tracing::debug!("Filtering expenses from {start_date} to {end_date}");
    store.filter_by_date_range(start_date, end_date)
}

/// Get the expenses whose title or date contains `keyword`.
///
/// # Errors
/// Returns [ValidationError::EmptyKeyword] without querying the store if `keyword` is blank.
pub fn search_by_keyword(
    keyword: &str,
    store: &impl ExpenseStore,
) -> Result<Vec<ExpenseSearchResult>, Error> {
    let keyword = keyword.trim();

    if keyword.is_empty() {
        return Err(ValidationError::EmptyKeyword.into());
    }

    tracing::debug!("Searching expenses for {keyword:?}");
    store.search(keyword)
}

/// Check that the expense `id` is stored without reading its fields.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if there is no expense with the ID `id`.
pub fn ensure_expense_exists(id: ExpenseId, store: &impl ExpenseStore) -> Result<(), Error> {
    if store.exists(id)? {
        Ok(())
    } else {
        tracing::warn!("No expense with ID {id}");
        Err(Error::ExpenseNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error, ValidationError,
        expense::{
            ExpenseForm, ExpenseStore, add_expense, delete_expense_by_id, filter_by_category,
            filter_by_date_range, list_expenses, search_by_keyword,
            test_utils::InMemoryExpenseStore, update_expense_by_id,
        },
    };

    fn form(title: &str, amount: f64, category: &str, date: &str) -> ExpenseForm {
        ExpenseForm {
            title: title.to_owned(),
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    fn coffee() -> ExpenseForm {
        form("Coffee", 3.5, "Food", "2024-01-15")
    }

    #[test]
    fn add_then_list_returns_the_new_expense() {
        let mut store = InMemoryExpenseStore::new();

        let created = add_expense(&coffee(), &mut store).expect("Could not add expense");

        let expenses = list_expenses(&store).unwrap();
        assert_eq!(expenses.len(), 1);
        let expense = &expenses[0];
        assert_eq!(expense.id, created.id);
        assert_eq!(expense.title.as_ref(), "Coffee");
        assert_eq!(expense.amount.as_f64(), 3.5);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.date, date!(2024 - 01 - 15).into());
    }

    #[test]
    fn add_rejects_blank_titles_without_writing() {
        let mut store = InMemoryExpenseStore::new();

        for title in ["", " ", "\t\n"] {
            let result = add_expense(&form(title, 3.5, "Food", "2024-01-15"), &mut store);

            assert_eq!(result, Err(ValidationError::EmptyTitle.into()));
        }

        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn add_rejects_non_positive_amounts_without_writing() {
        let mut store = InMemoryExpenseStore::new();

        for amount in [0.0, -0.01, -5.0] {
            let result = add_expense(&form("Coffee", amount, "Food", "2024-01-15"), &mut store);

            assert_eq!(
                result,
                Err(ValidationError::NonPositiveAmount(amount).into())
            );
        }

        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn add_rejects_malformed_dates_without_writing() {
        let mut store = InMemoryExpenseStore::new();

        let result = add_expense(&form("Coffee", 3.5, "Food", "15/01/2024"), &mut store);

        assert_eq!(
            result,
            Err(ValidationError::InvalidDate("15/01/2024".to_owned()).into())
        );
        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn add_reports_storage_errors() {
        let mut store = InMemoryExpenseStore::failing();

        let result = add_expense(&coffee(), &mut store);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn delete_missing_expense_leaves_rows_unchanged() {
        let mut store = InMemoryExpenseStore::new();
        add_expense(&coffee(), &mut store).unwrap();

        let result = delete_expense_by_id(42, &mut store);

        assert_eq!(result, Err(Error::ExpenseNotFound(42)));
        assert_eq!(list_expenses(&store).unwrap().len(), 1);
    }

    #[test]
    fn delete_existing_expense_succeeds() {
        let mut store = InMemoryExpenseStore::new();
        let created = add_expense(&coffee(), &mut store).unwrap();

        delete_expense_by_id(created.id, &mut store).expect("Could not delete expense");

        assert!(list_expenses(&store).unwrap().is_empty());
    }

    #[test]
    fn update_replaces_every_field() {
        let mut store = InMemoryExpenseStore::new();
        let created = add_expense(&coffee(), &mut store).unwrap();

        let updated = update_expense_by_id(
            created.id,
            &form(" Tea ", 2.0, "Drinks", "2024-02-01"),
            &mut store,
        )
        .expect("Could not update expense");

        assert_eq!(updated.title.as_ref(), "Tea");
        assert_eq!(store.get(created.id), Ok(updated));
    }

    #[test]
    fn update_with_invalid_amount_leaves_row_unchanged() {
        let mut store = InMemoryExpenseStore::new();
        let created = add_expense(&coffee(), &mut store).unwrap();

        let result = update_expense_by_id(
            created.id,
            &form("Tea", -5.0, "Drinks", "2024-02-01"),
            &mut store,
        );

        assert_eq!(result, Err(ValidationError::NonPositiveAmount(-5.0).into()));
        assert_eq!(store.get(created.id), Ok(created));
    }

    #[test]
    fn update_with_blank_title_leaves_row_unchanged() {
        let mut store = InMemoryExpenseStore::new();
        let created = add_expense(&coffee(), &mut store).unwrap();

        let result = update_expense_by_id(
            created.id,
            &form(" \t ", 2.0, "Drinks", "2024-02-01"),
            &mut store,
        );

        assert_eq!(result, Err(ValidationError::EmptyTitle.into()));
        assert_eq!(store.get(created.id), Ok(created));
    }

    #[test]
    fn rejected_update_only_looks_up_the_expense() {
        let mut store = InMemoryExpenseStore::new();
        let created = add_expense(&coffee(), &mut store).unwrap();
        let calls_before = store.query_count();

        let result = update_expense_by_id(
            created.id,
            &form("Tea", 0.0, "Drinks", "2024-02-01"),
            &mut store,
        );

        assert!(result.is_err());
        assert_eq!(store.query_count(), calls_before + 1);
        assert_eq!(store.get(created.id), Ok(created));
    }

    #[test]
    fn delete_of_missing_expense_only_looks_it_up() {
        let mut store = InMemoryExpenseStore::new();
        add_expense(&coffee(), &mut store).unwrap();
        let calls_before = store.query_count();

        let result = delete_expense_by_id(99, &mut store);

        assert_eq!(result, Err(Error::ExpenseNotFound(99)));
        assert_eq!(store.query_count(), calls_before + 1);
    }

    #[test]
    fn update_checks_existence_before_validating() {
        let mut store = InMemoryExpenseStore::new();

        let result = update_expense_by_id(7, &form("", -5.0, "", "nope"), &mut store);

        assert_eq!(result, Err(Error::ExpenseNotFound(7)));
    }

    #[test]
    fn update_reports_first_invalid_field() {
        let mut store = InMemoryExpenseStore::new();
        let created = add_expense(&coffee(), &mut store).unwrap();

        let result = update_expense_by_id(created.id, &form("Tea", 1.0, "", "nope"), &mut store);

        assert_eq!(
            result,
            Err(ValidationError::InvalidDate("nope".to_owned()).into())
        );
        assert_eq!(store.get(created.id), Ok(created));
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let mut store = InMemoryExpenseStore::new();
        let food = add_expense(&coffee(), &mut store).unwrap();
        add_expense(&form("Bus", 2.0, "Transport", "2024-01-16"), &mut store).unwrap();

        let got = filter_by_category("  food ", &store).unwrap();

        assert_eq!(got, vec![food]);
    }

    #[test]
    fn blank_category_is_rejected_without_querying() {
        let store = InMemoryExpenseStore::new();

        let result = filter_by_category("   ", &store);

        assert_eq!(result, Err(ValidationError::EmptyCategory.into()));
        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn date_range_is_inclusive() {
        let mut store = InMemoryExpenseStore::new();
        let first = add_expense(&form("First", 1.0, "A", "2024-01-01"), &mut store).unwrap();
        let last = add_expense(&form("Last", 1.0, "A", "2024-01-31"), &mut store).unwrap();
        add_expense(&form("Later", 1.0, "A", "2024-02-01"), &mut store).unwrap();

        let got = filter_by_date_range("2024-01-01", "2024-01-31", &store).unwrap();

        assert_eq!(got, vec![first, last]);
    }

    #[test]
    fn date_range_checks_start_before_end() {
        let store = InMemoryExpenseStore::new();

        let both_invalid = filter_by_date_range("bad", "worse", &store);
        let end_invalid = filter_by_date_range("2024-01-01", "worse", &store);

        assert_eq!(
            both_invalid,
            Err(ValidationError::InvalidStartDate("bad".to_owned()).into())
        );
        assert_eq!(
            end_invalid,
            Err(ValidationError::InvalidEndDate("worse".to_owned()).into())
        );
        assert_eq!(store.query_count(), 0);
    }

    #[test]
    fn search_matches_title_substring() {
        let mut store = InMemoryExpenseStore::new();
        let coffee = add_expense(&coffee(), &mut store).unwrap();
        add_expense(&form("Bus", 2.0, "Transport", "2024-03-16"), &mut store).unwrap();

        let got = search_by_keyword("cof", &store).unwrap();

        assert_eq!(got, vec![coffee.into()]);
    }

    #[test]
    fn blank_keyword_is_rejected_without_querying() {
        let store = InMemoryExpenseStore::new();

        let result = search_by_keyword(" \t", &store);

        assert_eq!(result, Err(ValidationError::EmptyKeyword.into()));
        assert_eq!(store.query_count(), 0);
    }
}
