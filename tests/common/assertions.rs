//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating gittracker report output and error messages.

#![allow(dead_code)]

use predicates::prelude::*;

/// Predicate for the report's summary line
pub fn summary(total: usize, tally: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{total} tracked repositories: {tally}"))
}

/// Predicate for the `=` separator under the summary line
pub fn has_separator() -> impl Predicate<str> {
    predicates::str::contains("=".repeat(60))
}

/// Predicate for the error printed when nothing is tracked
pub fn tracked_list_empty() -> impl Predicate<str> {
    predicates::str::contains("isn't currently tracking any repositories")
}

/// Predicate for an indented body line of a repository block
pub fn has_body_line(text: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("\n    {text}"))
}

/// Predicate for an itemized file line
pub fn has_file_line(text: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("\n        {text}"))
}

/// Predicate that fails on any ANSI escape sequence
pub fn no_ansi_codes() -> impl Predicate<str> {
    predicates::str::contains("\x1b[").not()
}
