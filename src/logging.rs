use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directives, e.g. `TALLY_LOG=tally=debug`.
pub const LOG_ENV: &str = "TALLY_LOG";
/// Path of an extra log file receiving everything that passes the filter.
pub const DEBUG_FILE_ENV: &str = "TALLY_DEBUG";

/// Initialise structured logging to stderr, warnings only unless `TALLY_LOG`
/// says otherwise. Safe to call more than once.
pub fn init() -> Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
    };

    let file_layer = match std::env::var_os(DEBUG_FILE_ENV).map(PathBuf::from) {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(filter("debug")),
            )
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter("warn")))
        .with(file_layer)
        .try_init();
    Ok(())
}
