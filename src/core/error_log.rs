//! Persistent log of unexpected errors.
//!
//! Each entry is a local timestamp, a blank line, the error with its `source()` chain, and a
//! separator line, appended to `<log dir>/logfile`.

use crate::core::error::{GitTrackerError, Result};
use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const ISSUES_URL: &str = "https://github.com/paxtonfitzpatrick/gittracker/issues/new";

/// Format one logfile entry
pub fn format_entry(error: &GitTrackerError, timestamp: &str) -> String {
    let mut entry = format!("{timestamp}\n\n{error}\n");

    let mut source = error.source();
    while let Some(cause) = source {
        entry.push_str(&format!("caused by: {cause}\n"));
        source = cause.source();
    }

    entry.push_str(&format!("\n{}\n\n", "=".repeat(60)));
    entry
}

/// Append `error` to the logfile, creating it (and its directory) if needed.
pub fn log_error(logfile: &Path, error: &GitTrackerError) -> Result<()> {
    if let Some(log_dir) = logfile.parent() {
        std::fs::create_dir_all(log_dir)?;
    }

    let timestamp = chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string();
    let mut file = OpenOptions::new().create(true).append(true).open(logfile)?;
    file.write_all(format_entry(error, &timestamp).as_bytes())?;
    log::debug!("logged error to {}", logfile.display());
    Ok(())
}

/// Message shown after an unexpected error was logged
pub fn bug_message(logfile: &Path) -> String {
    format!(
        "Uh oh! Looks like you might have encountered a bug, please consider posting an issue at:\n\t{ISSUES_URL}\n\nwith the contents of the logfile, found at:\n\t{}",
        logfile.display()
    )
}
