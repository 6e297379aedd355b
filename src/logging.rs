//! Log setup for the interactive program.
//!
//! Standard output belongs to the menu, so log events are written to a file instead.

use std::{fs::OpenOptions, io, path::Path, sync::Arc};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// The filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Send log events to the file at `log_path`, appending if it already exists.
///
/// The `RUST_LOG` environment variable overrides [DEFAULT_LOG_FILTER].
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn setup_logging(log_path: &Path) -> io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_log)
        .init();

    Ok(())
}
