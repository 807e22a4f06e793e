//! Interactive prompts.
//!
//! [`Prompter`] reads answers from any [`BufRead`] and writes questions to any [`Write`], so
//! commands can run against the real terminal while tests feed canned input.

use crate::core::error::{GitTrackerError, Result};
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompter bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask a yes/no question.
    ///
    /// `default` is used on an empty answer; with `None` the question is repeated instead.
    /// When `possible_bug` is set, answering `b` fails with `BugIdentified`.
    pub fn confirm(&mut self, prompt: &str, default: Option<bool>, possible_bug: bool) -> Result<bool> {
        let mut options = match default {
            Some(true) => "Y/n".to_string(),
            Some(false) => "y/N".to_string(),
            None => "y/n".to_string(),
        };

        let mut question = prompt.to_string();
        let hint = if possible_bug {
            question.push_str("\n(or, if you think you've encountered a bug, please enter 'b')");
            options.push_str("/b");
            "Please respond with either 'yes' (or 'y'), 'no' (or 'n'), or 'b' if you think you've encountered a bug"
        } else {
            "Please respond with either 'yes' (or 'y') or 'no' (or 'n')"
        };

        write!(self.output, "\n{question}\n[{options}]\n")?;
        loop {
            let answer = self.read_answer()?.to_lowercase();
            match (answer.as_str(), default) {
                ("", Some(default)) => return Ok(default),
                ("y" | "yes", _) => return Ok(true),
                ("n" | "no", _) => return Ok(false),
                ("b", _) if possible_bug => {
                    return Err(GitTrackerError::bug_identified(prompt.lines().next().unwrap_or(prompt)))
                }
                _ => write!(self.output, "\n{hint}\n[{options}]\n")?,
            }
        }
    }

    /// Single-letter menu; `options` pairs each letter with its description.
    ///
    /// Returns the chosen letter once one of them is entered.
    pub fn choose(&mut self, prompt: &str, options: &[(char, &str)]) -> Result<char> {
        let menu = options
            .iter()
            .map(|(letter, description)| format!("[{letter}] {description}"))
            .collect::<Vec<_>>()
            .join("\n");
        let letters = options
            .iter()
            .map(|(letter, _)| letter.to_string())
            .collect::<Vec<_>>()
            .join("/");

        write!(self.output, "\n{prompt}\n{menu}\n")?;
        loop {
            let answer = self.read_answer()?.to_lowercase();
            let mut chars = answer.chars();
            if let (Some(letter), None) = (chars.next(), chars.next()) {
                if options.iter().any(|(option, _)| *option == letter) {
                    return Ok(letter);
                }
            }
            write!(self.output, "\nPlease enter one of: {letters}\n")?;
        }
    }

    /// Free-form answer, trimmed
    pub fn ask_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "\n{prompt}\n")?;
        self.read_answer()
    }

    /// Print a message on the prompter's output
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn read_answer(&mut self) -> Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GitTrackerError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}
