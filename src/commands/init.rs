use crate::commands::{add::execute_add, find::execute_find, find::FindOptions};
use crate::core::{
    config::TrackerConfig,
    dirs::AppPaths,
    error::Result,
    output::print_error,
    prompt::Prompter,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Guided first run: search for repositories or enter them by hand until the user quits.
pub fn execute_init<R: BufRead, W: Write>(
    paths: &AppPaths,
    config: &TrackerConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let choice = prompter.choose(
        "Would you like to set up GitTracker by:",
        &[
            ('a', "automatically searching for local repositories"),
            ('m', "manually entering repository paths"),
            ('q', "quit"),
        ],
    )?;

    match choice {
        'a' => {
            let mut question = "Enter the path to the outermost directory you'd like to search under";
            loop {
                let answer = prompter.ask_line(question)?;
                if answer == "q" {
                    break;
                }
                let options = FindOptions {
                    topdir: PathBuf::from(answer),
                    ignore: Vec::new(),
                    search_hidden: config.search_hidden,
                    permission_errors: config.permission_errors,
                    quiet: false,
                    yes: false,
                };
                report_recoverable(execute_find(paths, &options, prompter))?;
                question = "Enter another directory to search under, or 'q' if you're done";
            }
        }
        'm' => {
            let mut question = "Enter the path to a repository you'd like to track";
            loop {
                let answer = prompter.ask_line(question)?;
                if answer == "q" {
                    break;
                }
                report_recoverable(execute_add(paths, &[PathBuf::from(answer)], false, prompter))?;
                question = "Enter another repository path, or 'q' if you're done";
            }
        }
        _ => {}
    }

    Ok(())
}

/// Print user-fixable errors and keep going; anything unexpected ends the session.
fn report_recoverable(result: Result<usize>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_unexpected() => Err(e),
        Err(e) => {
            print_error(&e.to_string());
            Ok(())
        }
    }
}
