use crate::core::{
    collector::collect_status,
    colors::Painter,
    config::{ErrorPolicy, TrackerConfig},
    dirs::AppPaths,
    error::{GitTrackerError, Result},
    output::{print_alert, print_warning},
    paths::{clean_path, validate_repo, validate_writable_path},
    prompt::Prompter,
    report::{Renderer, Sink},
    status::{RepoStatus, Verbosity},
    tracked::TrackedRepos,
};
use colored::*;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Effective settings for one `status` run, after merging flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOptions {
    pub verbosity: Verbosity,
    pub submodule_depth: usize,
    pub file: Option<PathBuf>,
    pub plain: bool,
    pub on_error: ErrorPolicy,
}

impl StatusOptions {
    /// `verbose` is the number of `-v` flags; zero means "use the configured default".
    pub fn resolve(
        verbose: u8,
        submodules: Option<usize>,
        file: Option<PathBuf>,
        plain: bool,
        on_error: Option<ErrorPolicy>,
        config: &TrackerConfig,
    ) -> Self {
        let verbosity = if verbose == 0 {
            config.verbosity()
        } else {
            Verbosity::from_level(verbose.min(3))
        };

        // Submodule reports are only rendered at full verbosity
        let submodule_depth = if verbosity == Verbosity::Full {
            submodules.unwrap_or(config.submodule_depth)
        } else {
            0
        };

        Self {
            verbosity,
            submodule_depth,
            file,
            plain: plain || config.plain,
            on_error: on_error.unwrap_or(config.on_error),
        }
    }

    pub fn color_enabled(&self) -> bool {
        !self.plain && self.file.is_none()
    }
}

pub fn execute_status<R: BufRead, W: Write>(
    paths: &AppPaths,
    options: &StatusOptions,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let mut tracked = TrackedRepos::load_required(&paths.tracked_file)?;
    let repos = validate_tracked_repos(&mut tracked, prompter)?;

    let sink = match &options.file {
        Some(file) => Sink::File(validate_writable_path(file)?),
        None => Sink::Terminal,
    };

    let statuses = collect_all(&repos, options, prompter)?;

    let painter = Painter::new(options.color_enabled());
    if painter.is_enabled() {
        colored::control::set_override(true);
    }

    let report = Renderer::new(painter, options.verbosity).render(&statuses);
    log::debug!(
        "{} clean, {} with changes",
        report.n_clean(),
        report.n_dirty()
    );
    sink.deliver(&report.to_text())
}

/// Walk the tracked list, letting the user fix entries that no longer point at a repository.
///
/// Every fix is applied to `tracked` and written back in a single save. Returns the
/// repositories left to collect, in list order.
pub fn validate_tracked_repos<R: BufRead, W: Write>(
    tracked: &mut TrackedRepos,
    prompter: &mut Prompter<R, W>,
) -> Result<Vec<PathBuf>> {
    let mut changed = false;

    for repo in tracked.repos().to_vec() {
        let problem = match validate_repo(&repo) {
            Ok(()) => continue,
            Err(GitTrackerError::RepoNotFound { .. }) => "no longer exists",
            Err(GitTrackerError::NoGitdir { .. }) => "is no longer a git repository",
            Err(e) => return Err(e),
        };
        log::debug!("tracked path {} {problem}", repo.display());
        prompter.say(&format!("\n{}", format!("{} {problem}", repo.display()).red()))?;

        loop {
            let choice = prompter.choose(
                "What would you like to do?",
                &[
                    ('u', "update the repository's path"),
                    ('d', "stop tracking it"),
                    ('b', "report a bug"),
                    ('q', "quit"),
                ],
            )?;

            match choice {
                'u' => {
                    let new_path = clean_path(prompter.ask_line("Enter the new path to the repository")?)?;
                    if new_path != repo && tracked.contains(&new_path) {
                        prompter.say(&format!("{} is already tracked", new_path.display()).red().to_string())?;
                        continue;
                    }
                    if validate_repo(&new_path).is_err() {
                        let question = format!(
                            "{} does not appear to be a valid git repository. Use it anyway?",
                            new_path.display()
                        );
                        if !prompter.confirm(&question, Some(false), false)? {
                            continue;
                        }
                    }
                    tracked.replace(&repo, new_path)?;
                    changed = true;
                    break;
                }
                'd' => {
                    let question = format!("Stop tracking {}?", repo.display());
                    if prompter.confirm(&question, Some(false), false)? {
                        tracked.remove(&repo)?;
                        changed = true;
                        break;
                    }
                }
                'b' => {
                    if changed {
                        tracked.save()?;
                    }
                    return Err(GitTrackerError::bug_identified("validating tracked repositories"));
                }
                _ => {
                    if changed {
                        tracked.save()?;
                    }
                    return Err(GitTrackerError::Aborted);
                }
            }
        }
    }

    if changed {
        tracked.save()?;
    }
    Ok(tracked.repos().to_vec())
}

fn collect_all<R: BufRead, W: Write>(
    repos: &[PathBuf],
    options: &StatusOptions,
    prompter: &mut Prompter<R, W>,
) -> Result<Vec<RepoStatus>> {
    let mut statuses = Vec::with_capacity(repos.len());

    for repo in repos {
        let error = match collect_status(repo, options.verbosity, options.submodule_depth) {
            Ok(status) => {
                statuses.push(status);
                continue;
            }
            Err(e) => e,
        };

        if let GitTrackerError::EmptyRepository { .. } = error {
            print_alert(&format!("skipping {}: {error}", repo.display()));
            continue;
        }

        match options.on_error {
            ErrorPolicy::Skip => {
                log::debug!("failed to collect {}: {error}", repo.display());
                print_warning(&format!("skipping {}: {error}", repo.display()));
            }
            ErrorPolicy::Abort => return Err(error),
            ErrorPolicy::Prompt => {
                print_alert(&format!("failed to read {}: {error}", repo.display()));
                if !prompter.confirm("Skip this repository and continue?", Some(true), true)? {
                    return Err(error);
                }
            }
        }
    }

    Ok(statuses)
}
