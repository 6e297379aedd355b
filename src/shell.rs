//! The interactive text menu.
//!
//! The shell reads a menu choice and the fields it needs, calls the matching expense
//! operation, and prints the outcome. Errors from an operation are printed and the menu is
//! shown again, so the loop only stops on Exit or when the input runs out.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    str::FromStr,
};

use crate::{
    Error, ValidationError,
    database_id::ExpenseId,
    expense::{
        Expense, ExpenseForm, ExpenseSearchResult, ExpenseStore, add_expense,
        delete_expense_by_id, ensure_expense_exists, filter_by_category, filter_by_date_range, list_expenses,
        search_by_keyword, update_expense_by_id,
    },
};

/// An entry in the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Record a new expense.
    Add,
    /// List every expense.
    ViewAll,
    /// Delete an expense by ID.
    Delete,
    /// Replace the fields of an expense by ID.
    Update,
    /// List the expenses in one category.
    FilterByCategory,
    /// List the expenses between two dates.
    FilterByDateRange,
    /// Find expenses by a word in their title or date.
    Search,
    /// Leave the menu loop.
    Exit,
}

impl MenuChoice {
    /// Every choice in the order it is listed.
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Add,
        MenuChoice::ViewAll,
        MenuChoice::Delete,
        MenuChoice::Update,
        MenuChoice::FilterByCategory,
        MenuChoice::FilterByDateRange,
        MenuChoice::Search,
        MenuChoice::Exit,
    ];

    /// The number the user types to pick this choice.
    pub fn number(self) -> u8 {
        match self {
            MenuChoice::Add => 1,
            MenuChoice::ViewAll => 2,
            MenuChoice::Delete => 3,
            MenuChoice::Update => 4,
            MenuChoice::FilterByCategory => 5,
            MenuChoice::FilterByDateRange => 6,
            MenuChoice::Search => 7,
            MenuChoice::Exit => 8,
        }
    }
}

impl Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MenuChoice::Add => "Add Expense",
            MenuChoice::ViewAll => "View All Expenses",
            MenuChoice::Delete => "Delete Expense",
            MenuChoice::Update => "Update Expense",
            MenuChoice::FilterByCategory => "Filter by Category",
            MenuChoice::FilterByDateRange => "Filter by Date Range",
            MenuChoice::Search => "Search Expenses",
            MenuChoice::Exit => "Exit",
        };

        write!(f, "{label}")
    }
}

/// The text did not name a menu choice.
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidMenuChoice;

impl FromStr for MenuChoice {
    type Err = InvalidMenuChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuChoice::ALL
            .into_iter()
            .find(|choice| s.trim() == choice.number().to_string())
            .ok_or(InvalidMenuChoice)
    }
}

/// Format an expense as a single line for listings and filters.
pub fn format_expense(expense: &Expense) -> String {
    format!(
        "ID:{} | Title:{} | Amount:{} | Category:{} | Date:{}",
        expense.id, expense.title, expense.amount, expense.category, expense.date
    )
}

/// Format a keyword search result as a single line.
///
/// Search results do not carry a category, so none is shown.
pub fn format_search_result(result: &ExpenseSearchResult) -> String {
    format!(
        "ID:{} | Title:{} | Amount:{} | Date:{}",
        result.id, result.title, result.amount, result.date
    )
}

/// Runs the menu loop against an [ExpenseStore], reading from `input` and writing to `output`.
pub struct Shell<S, R, W> {
    store: S,
    input: R,
    output: W,
}

impl<S, R, W> Shell<S, R, W>
where
    S: ExpenseStore,
    R: BufRead,
    W: Write,
{
    /// Create a shell that manages `store`, reading from `input` and writing to `output`.
    pub fn new(store: S, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Give back the store, e.g. to inspect it after the loop has finished.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Show the menu and handle choices until Exit is chosen or `input` is exhausted.
    ///
    /// # Errors
    /// Only I/O errors on `input` or `output` end the loop early. Errors from expense
    /// operations are printed.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.prompt("Enter your choice:\n")? else {
                tracing::info!("Reached end of input, exiting");
                return Ok(());
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting program...")?;
                    return Ok(());
                }
                Ok(choice) => {
                    tracing::debug!("Menu choice: {choice}");
                    self.handle(choice)?;
                }
                Err(InvalidMenuChoice) => writeln!(self.output, "Invalid choice, try again.")?,
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== EXPENSE TRACKER MENU =====")?;

        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {choice}", choice.number())?;
        }

        Ok(())
    }

    fn handle(&mut self, choice: MenuChoice) -> io::Result<()> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::ViewAll => self.view_all(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Update => self.update(),
            MenuChoice::FilterByCategory => self.filter_by_category(),
            MenuChoice::FilterByDateRange => self.filter_by_date_range(),
            MenuChoice::Search => self.search(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(form) = self.read_form(
            "Enter Title: ",
            "Enter Amount: ",
            "Enter Category: ",
            "Enter Date (YYYY-MM-DD): ",
        )?
        else {
            return Ok(());
        };

        match add_expense(&form, &mut self.store) {
            Ok(_) => writeln!(self.output, "Expense added successfully!"),
            Err(error) => self.report(error),
        }
    }

    fn view_all(&mut self) -> io::Result<()> {
        match list_expenses(&self.store) {
            Ok(expenses) if expenses.is_empty() => writeln!(self.output, "No Expenses Found."),
            Ok(expenses) => self.print_expenses(&expenses),
            Err(error) => self.report(error),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(id) = self.read_id("Enter Expense ID to delete: ")? else {
            return Ok(());
        };

        match delete_expense_by_id(id, &mut self.store) {
            Ok(()) => writeln!(self.output, "Expense Deleted Successfully!"),
            Err(error) => self.report(error),
        }
    }

    fn update(&mut self) -> io::Result<()> {
        let Some(id) = self.read_id("Enter Expense ID to update: ")? else {
            return Ok(());
        };
        if let Err(error) = ensure_expense_exists(id, &self.store) {
            return self.report(error);
        }
        let Some(form) = self.read_form(
            "New Title: ",
            "New Amount: ",
            "New Category: ",
            "New Date (YYYY-MM-DD): ",
        )?
        else {
            return Ok(());
        };

        match update_expense_by_id(id, &form, &mut self.store) {
            Ok(_) => writeln!(self.output, "Expense updated successfully!"),
            Err(error) => self.report(error),
        }
    }

    fn filter_by_category(&mut self) -> io::Result<()> {
        let Some(category) = self.prompt("Enter Category: ")? else {
            return Ok(());
        };

        match filter_by_category(&category, &self.store) {
            Ok(expenses) if expenses.is_empty() => writeln!(
                self.output,
                "Expenses not found for category: {}",
                category.trim()
            ),
            Ok(expenses) => self.print_expenses(&expenses),
            Err(error) => self.report(error),
        }
    }

    fn filter_by_date_range(&mut self) -> io::Result<()> {
        let Some(start) = self.prompt("Enter Start date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let Some(end) = self.prompt("Enter End date (YYYY-MM-DD): ")? else {
            return Ok(());
        };

        match filter_by_date_range(&start, &end, &self.store) {
            Ok(expenses) if expenses.is_empty() => writeln!(
                self.output,
                "No expenses found between {start} and {end}."
            ),
            Ok(expenses) => self.print_expenses(&expenses),
            Err(error) => self.report(error),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let Some(keyword) = self.prompt("Enter Keyword to search: ")? else {
            return Ok(());
        };

        match search_by_keyword(&keyword, &self.store) {
            Ok(results) if results.is_empty() => {
                writeln!(self.output, "No expenses matched your search keyword.")
            }
            Ok(results) => {
                for result in &results {
                    writeln!(self.output, "{}", format_search_result(result))?;
                }

                Ok(())
            }
            Err(error) => self.report(error),
        }
    }

    fn print_expenses(&mut self, expenses: &[Expense]) -> io::Result<()> {
        for expense in expenses {
            writeln!(self.output, "{}", format_expense(expense))?;
        }

        Ok(())
    }

    fn report(&mut self, error: Error) -> io::Result<()> {
        writeln!(self.output, "Error: {error}")
    }

    /// Read the four expense fields. Returns `None` if the input ran out or the amount was
    /// not a number, in which case the problem has already been reported.
    fn read_form(
        &mut self,
        title_prompt: &str,
        amount_prompt: &str,
        category_prompt: &str,
        date_prompt: &str,
    ) -> io::Result<Option<ExpenseForm>> {
        let Some(title) = self.prompt(title_prompt)? else {
            return Ok(None);
        };
        let Some(raw_amount) = self.prompt(amount_prompt)? else {
            return Ok(None);
        };
        let amount = match parse_amount(&raw_amount) {
            Ok(amount) => amount,
            Err(error) => {
                self.report(error.into())?;
                return Ok(None);
            }
        };
        let Some(category) = self.prompt(category_prompt)? else {
            return Ok(None);
        };
        let Some(date) = self.prompt(date_prompt)? else {
            return Ok(None);
        };

        Ok(Some(ExpenseForm {
            title,
            amount,
            category,
            date,
        }))
    }

    fn read_id(&mut self, prompt: &str) -> io::Result<Option<ExpenseId>> {
        let Some(raw_id) = self.prompt(prompt)? else {
            return Ok(None);
        };

        match parse_id(&raw_id) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                self.report(error.into())?;
                Ok(None)
            }
        }
    }

    /// Print `message` and read one line without its line ending.
    ///
    /// Returns `None` at the end of the input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        Ok(Some(line.to_owned()))
    }
}

fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidAmountInput(text.to_owned()))
}

fn parse_id(text: &str) -> Result<ExpenseId, ValidationError> {
    text.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidIdInput(text.to_owned()))
}
