use std::{
    error::Error,
    io::{self},
    path::PathBuf,
};

use clap::Parser;

use expense_tracker::{expense::SQLiteExpenseStore, setup_logging, shell::Shell};

/// An interactive personal expense tracker backed by a local SQLite database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    ///
    /// The `expenses` table must already exist unless `--init` is given.
    #[arg(long, default_value = "expense.db")]
    db_path: PathBuf,

    /// Create the `expenses` table if it is missing before showing the menu.
    #[arg(long)]
    init: bool,

    /// File path to append log messages to.
    #[arg(long, default_value = "expense_tracker.log")]
    log_path: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(&args.log_path)?;
    tracing::info!("Starting expense tracker with database {:?}", args.db_path);

    let store = SQLiteExpenseStore::new(&args.db_path);

    if args.init {
        store.initialize()?;
    }

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    Shell::new(store, stdin, stdout).run()?;

    tracing::info!("Expense tracker closed");

    Ok(())
}
