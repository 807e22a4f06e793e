//! Status report rendering.
//!
//! The renderer turns a list of [`RepoStatus`] records into a [`Report`]: a small tree of
//! [`RepoBlock`]s made of indented [`Line`]s, plus the clean/dirty tally used by the summary
//! line. The tree is converted to text once, by [`Report::to_text`], and handed to a [`Sink`].
//!
//! # Layout
//! ```text
//! 3 tracked repositories: 2 up-to-date, 1 with changes
//! ============================================================
//! alpha
//!     /home/me/code/alpha
//!     on branch main: even with origin/main
//!     0 uncommitted changes
//!
//! beta
//!     ...
//! ```
//!
//! Block bodies are indented four spaces and itemized files eight. Colors come from a
//! [`Painter`], so a disabled painter yields plain text with identical layout.

use crate::core::{
    change_type::ChangeType,
    colors::{Painter, Style},
    error::Result,
    status::{
        ChangeCounts, DetachedHead, FileLists, HeadState, RepoStatus, SubmoduleStatus,
        TrackingState, Verbosity,
    },
};
use crossterm::{
    cursor::MoveTo,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use std::io::{stdout, IsTerminal, Write};
use std::path::{Path, PathBuf};

const SEPARATOR_WIDTH: usize = 60;
const INDENT: &str = "    ";

/// One output line, `depth` levels of indentation deep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text: String,
}

impl Line {
    pub fn new(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }

    fn to_text(&self) -> String {
        format!("{}{}", INDENT.repeat(self.depth), self.text)
    }
}

/// Rendered lines for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoBlock {
    pub clean: bool,
    pub lines: Vec<Line>,
}

impl RepoBlock {
    fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::to_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A complete status report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub summary: String,
    pub blocks: Vec<RepoBlock>,
}

impl Report {
    pub fn n_clean(&self) -> usize {
        self.blocks.iter().filter(|block| block.clean).count()
    }

    pub fn n_dirty(&self) -> usize {
        self.blocks.len() - self.n_clean()
    }

    /// Summary line, separator, then the repository blocks separated by blank lines
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n{}\n", self.summary, "=".repeat(SEPARATOR_WIDTH));
        let blocks = self
            .blocks
            .iter()
            .map(RepoBlock::to_text)
            .collect::<Vec<_>>()
            .join("\n\n");
        text.push_str(&blocks);
        text.push('\n');
        text
    }
}

/// Builds [`Report`]s at a fixed verbosity with a fixed painter
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    painter: Painter,
    verbosity: Verbosity,
}

impl Renderer {
    pub fn new(painter: Painter, verbosity: Verbosity) -> Self {
        Self { painter, verbosity }
    }

    pub fn render(&self, statuses: &[RepoStatus]) -> Report {
        let blocks: Vec<RepoBlock> = statuses.iter().map(|status| self.repo_block(status)).collect();
        let n_clean = blocks.iter().filter(|block| block.clean).count();
        let summary = self.summary(n_clean, blocks.len() - n_clean);
        Report { summary, blocks }
    }

    /// `<total> tracked repositories: <all up-to-date | all with changes | n up-to-date, m with changes>`
    pub fn summary(&self, n_clean: usize, n_dirty: usize) -> String {
        let total = n_clean + n_dirty;
        let tally = if n_dirty == 0 {
            self.painter.paint("all up-to-date", &[Style::Green])
        } else if n_clean == 0 {
            self.painter.paint("all with changes", &[Style::Red])
        } else {
            format!(
                "{} up-to-date, {} with changes",
                self.painter.paint(n_clean, &[Style::Bold, Style::Green]),
                self.painter.paint(n_dirty, &[Style::Bold, Style::Red]),
            )
        };
        format!("{total} tracked repositories: {tally}")
    }

    pub fn repo_block(&self, status: &RepoStatus) -> RepoBlock {
        let clean = status.is_clean();
        let state_color = if clean { Style::Green } else { Style::Red };

        let mut lines = vec![Line::new(
            0,
            self.painter.paint(status.name(), &[Style::Bold, state_color]),
        )];

        if self.verbosity == Verbosity::Minimal {
            return RepoBlock { clean, lines };
        }

        lines.push(Line::new(1, status.path.display().to_string()));

        let head_line = match &status.head {
            HeadState::Tracking(tracking) => self.branch_phrase(tracking, state_color),
            HeadState::Detached(detached) => self.detached_phrase(detached),
        };
        lines.push(Line::new(1, head_line));

        match (&status.files, self.verbosity) {
            (Some(files), Verbosity::Full) => self.file_lines(&status.changes, files, &mut lines),
            _ => lines.push(Line::new(
                1,
                format!("{} uncommitted changes", status.changes.total()),
            )),
        }

        if self.verbosity == Verbosity::Full {
            if let Some(submodules) = &status.submodules {
                lines.push(Line::new(1, "submodules:"));
                self.submodule_lines(submodules, 2, &mut lines);
            }
        }

        RepoBlock { clean, lines }
    }

    fn branch_phrase(&self, tracking: &TrackingState, state_color: Style) -> String {
        let branch = self.painter.paint(&tracking.local_branch, &[state_color]);
        let prefix = format!("on branch {branch}");

        let (Some(ahead), Some(behind)) = (tracking.ahead, tracking.behind) else {
            return prefix;
        };
        let remote = tracking.remote_name();

        let comparison = match (ahead, behind) {
            (0, 0) => format!("even with {remote}"),
            (ahead, 0) => format!("{} ahead of {remote}", commits(ahead)),
            (0, behind) => format!("{} behind {remote}", commits(behind)),
            (ahead, behind) => format!("{} behind, {ahead} ahead of {remote}", commits(behind)),
        };
        format!("{prefix}: {comparison}")
    }

    fn detached_phrase(&self, detached: &DetachedHead) -> String {
        let mut phrase = format!(
            "HEAD detached at {} (from branch: {}",
            self.painter.paint(&detached.hexsha, &[Style::Red]),
            detached.from_branch
        );
        if let Some(ref_sha) = &detached.ref_sha {
            phrase.push('@');
            phrase.push_str(ref_sha);
        }
        phrase.push(')');

        let new_commits = detached.new_commits();
        if new_commits > 0 {
            phrase.push_str(&format!(" {} since detached", plural(new_commits, "new commit", "new commits")));
        }
        phrase
    }

    fn file_lines(&self, counts: &ChangeCounts, files: &FileLists, lines: &mut Vec<Line>) {
        if counts.is_empty() {
            lines.push(Line::new(1, "nothing to commit, working tree clean"));
            return;
        }

        if !files.staged.is_empty() {
            lines.push(Line::new(
                1,
                format!("{}:", plural(files.staged.len(), "staged change", "staged changes")),
            ));
            for file in &files.staged {
                let target = if file.change.has_source_path() {
                    format!("{} -> {}", file.old_path.display(), file.new_path.display())
                } else {
                    file.new_path.display().to_string()
                };
                lines.push(Line::new(2, self.file_entry(file.change, &target, Style::Green)));
            }
        }

        if !files.not_staged.is_empty() {
            lines.push(Line::new(
                1,
                format!("{}:", plural(files.not_staged.len(), "unstaged change", "unstaged changes")),
            ));
            for file in &files.not_staged {
                let target = file.path.display().to_string();
                lines.push(Line::new(2, self.file_entry(file.change, &target, Style::Red)));
            }
        }

        if !files.untracked.is_empty() {
            lines.push(Line::new(
                1,
                format!("{}:", plural(files.untracked.len(), "untracked file", "untracked files")),
            ));
            for path in &files.untracked {
                lines.push(Line::new(2, self.painter.paint(path.display(), &[Style::Red])));
            }
        }
    }

    fn file_entry(&self, change: ChangeType, target: &str, color: Style) -> String {
        self.painter
            .paint(format!("{}:  {target}", change.keyword()), &[color])
    }

    fn submodule_lines(&self, submodules: &[(PathBuf, SubmoduleStatus)], depth: usize, lines: &mut Vec<Line>) {
        for (path, submodule) in submodules {
            lines.push(Line::new(depth, self.submodule_entry(path, submodule)));

            if let SubmoduleStatus::Status(status) = submodule {
                if let Some(nested) = &status.submodules {
                    self.submodule_lines(nested, depth + 1, lines);
                }
            }
        }
    }

    fn submodule_entry(&self, path: &Path, submodule: &SubmoduleStatus) -> String {
        let phrase = match submodule {
            SubmoduleStatus::Status(status) if status.is_clean() => {
                self.painter.paint("clean", &[Style::Green])
            }
            SubmoduleStatus::Status(_) => self.painter.paint("dirty", &[Style::Red]),
            SubmoduleStatus::Detached { hexsha, .. } => {
                self.painter.paint(format!("detached at {hexsha}"), &[Style::Yellow])
            }
            SubmoduleStatus::NotInitialized => self.painter.paint("not initialized", &[Style::Yellow]),
        };
        format!("{}: {phrase}", path.display())
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn commits(count: usize) -> String {
    plural(count, "commit", "commits")
}

/// Where a rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// Standard output, cleared first when it is a terminal
    Terminal,
    /// A file, overwritten with plain text
    File(PathBuf),
}

impl Sink {
    pub fn deliver(&self, text: &str) -> Result<()> {
        match self {
            Sink::Terminal => {
                let mut out = stdout();
                if out.is_terminal() {
                    out.execute(Clear(ClearType::All))?;
                    out.execute(MoveTo(0, 0))?;
                }
                write!(out, "{text}")?;
                out.flush()?;
            }
            Sink::File(path) => {
                log::debug!("writing report to {}", path.display());
                std::fs::write(path, text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colors::strip_ansi_codes;
    use crate::core::status::{StagedFile, UnstagedFile};
    use pretty_assertions::assert_eq;

    fn tracking(path: &str, ahead: usize, behind: usize, changes: ChangeCounts) -> RepoStatus {
        RepoStatus::new(
            path,
            HeadState::Tracking(TrackingState::with_remote("main", "origin/main", ahead, behind)),
            changes,
        )
    }

    fn plain(verbosity: Verbosity) -> Renderer {
        Renderer::new(Painter::plain(), verbosity)
    }

    #[test]
    fn test_level_two_ahead_with_changes() {
        let status = tracking(
            "/repos/api",
            2,
            0,
            ChangeCounts {
                not_staged: 1,
                ..Default::default()
            },
        );
        let block = plain(Verbosity::Moderate).repo_block(&status);
        assert!(!block.clean);
        assert_eq!(
            block.to_text(),
            "api\n    /repos/api\n    on branch main: 2 commits ahead of origin/main\n    1 uncommitted changes"
        );
    }

    #[test]
    fn test_branch_phrases() {
        let renderer = plain(Verbosity::Moderate);
        let phrase = |ahead, behind| {
            let status = tracking("/r", ahead, behind, ChangeCounts::default());
            renderer.repo_block(&status).lines[2].text.clone()
        };
        assert_eq!(phrase(0, 0), "on branch main: even with origin/main");
        assert_eq!(phrase(1, 0), "on branch main: 1 commit ahead of origin/main");
        assert_eq!(phrase(0, 3), "on branch main: 3 commits behind origin/main");
        assert_eq!(phrase(2, 3), "on branch main: 3 commits behind, 2 ahead of origin/main");

        let untracked = RepoStatus::new(
            "/r",
            HeadState::Tracking(TrackingState::untracked("dev")),
            ChangeCounts::default(),
        );
        assert_eq!(renderer.repo_block(&untracked).lines[2].text, "on branch dev");
    }

    #[test]
    fn test_level_one_is_name_only() {
        let status = tracking(
            "/repos/api",
            0,
            0,
            ChangeCounts {
                untracked: 4,
                ..Default::default()
            },
        );
        let block = plain(Verbosity::Minimal).repo_block(&status);
        assert_eq!(block.lines, vec![Line::new(0, "api")]);
    }

    #[test]
    fn test_detached_paragraph() {
        let mut detached = DetachedHead {
            hexsha: "abc1234".to_string(),
            from_branch: "main".to_string(),
            ref_sha: None,
            detached_commits: None,
        };
        let renderer = plain(Verbosity::Moderate);
        let status = RepoStatus::new("/r/x", HeadState::Detached(detached.clone()), ChangeCounts::default());
        let block = renderer.repo_block(&status);
        assert!(!block.clean);
        assert_eq!(block.lines[2].text, "HEAD detached at abc1234 (from branch: main)");

        detached.ref_sha = Some("9f8e7d6".to_string());
        detached.detached_commits = Some(1);
        let status = RepoStatus::new("/r/x", HeadState::Detached(detached), ChangeCounts::default());
        assert_eq!(
            renderer.repo_block(&status).lines[2].text,
            "HEAD detached at abc1234 (from branch: main@9f8e7d6) 1 new commit since detached"
        );
    }

    #[test]
    fn test_level_three_file_lists() {
        let mut status = tracking(
            "/repos/web",
            0,
            0,
            ChangeCounts {
                staged: 2,
                not_staged: 1,
                untracked: 1,
            },
        );
        status.files = Some(FileLists {
            staged: vec![
                StagedFile {
                    change: ChangeType::Added,
                    old_path: PathBuf::from("new.rs"),
                    new_path: PathBuf::from("new.rs"),
                },
                StagedFile {
                    change: ChangeType::Renamed,
                    old_path: PathBuf::from("old.rs"),
                    new_path: PathBuf::from("moved.rs"),
                },
            ],
            not_staged: vec![UnstagedFile {
                change: ChangeType::Modified,
                path: PathBuf::from("lib.rs"),
            }],
            untracked: vec![PathBuf::from("scratch.txt")],
        });

        let text = plain(Verbosity::Full).repo_block(&status).to_text();
        let expected = "\
web
    /repos/web
    on branch main: even with origin/main
    2 staged changes:
        new file:  new.rs
        renamed:  old.rs -> moved.rs
    1 unstaged change:
        modified:  lib.rs
    1 untracked file:
        scratch.txt";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_level_three_clean_tree_and_submodules() {
        let mut status = tracking("/repos/mono", 0, 0, ChangeCounts::default());
        status.files = Some(FileLists::default());

        let mut nested_parent = tracking("/repos/mono/libs/core", 0, 0, ChangeCounts::default());
        nested_parent.submodules = Some(vec![(
            PathBuf::from("vendor/zlib"),
            SubmoduleStatus::NotInitialized,
        )]);

        status.submodules = Some(vec![
            (PathBuf::from("libs/core"), SubmoduleStatus::Status(Box::new(nested_parent))),
            (
                PathBuf::from("libs/pinned"),
                SubmoduleStatus::Detached {
                    hexsha: "1234567".to_string(),
                    at_recorded_commit: false,
                },
            ),
        ]);

        let block = plain(Verbosity::Full).repo_block(&status);
        assert!(!block.clean);
        let expected = "\
mono
    /repos/mono
    on branch main: even with origin/main
    nothing to commit, working tree clean
    submodules:
        libs/core: clean
            vendor/zlib: not initialized
        libs/pinned: detached at 1234567";
        assert_eq!(block.to_text(), expected);
    }

    #[test]
    fn test_summary_variants() {
        let renderer = plain(Verbosity::Minimal);
        assert_eq!(renderer.summary(3, 0), "3 tracked repositories: all up-to-date");
        assert_eq!(renderer.summary(0, 2), "2 tracked repositories: all with changes");
        assert_eq!(renderer.summary(2, 1), "3 tracked repositories: 2 up-to-date, 1 with changes");
    }

    #[test]
    fn test_summary_counts_colored_independently() {
        colored::control::set_override(true);
        let renderer = Renderer::new(Painter::new(true), Verbosity::Minimal);
        assert_eq!(
            renderer.summary(2, 1),
            "3 tracked repositories: \x1b[1;32m2\x1b[0m up-to-date, \x1b[1;31m1\x1b[0m with changes"
        );
    }

    #[test]
    fn test_full_report_text() {
        let statuses = vec![
            tracking("/r/a", 0, 0, ChangeCounts::default()),
            tracking("/r/b", 0, 0, ChangeCounts::default()),
            tracking("/r/c", 0, 1, ChangeCounts::default()),
        ];
        let report = plain(Verbosity::Minimal).render(&statuses);
        assert_eq!(report.n_clean(), 2);
        assert_eq!(report.n_dirty(), 1);

        let expected = format!(
            "3 tracked repositories: 2 up-to-date, 1 with changes\n{}\na\n\nb\n\nc\n",
            "=".repeat(60)
        );
        assert_eq!(report.to_text(), expected);
    }

    #[test]
    fn test_colored_name_matches_plain_layout() {
        colored::control::set_override(true);
        let status = tracking("/r/dirty", 1, 0, ChangeCounts::default());
        let colored_text = Renderer::new(Painter::new(true), Verbosity::Moderate)
            .repo_block(&status)
            .to_text();
        let plain_text = plain(Verbosity::Moderate).repo_block(&status).to_text();

        assert!(colored_text.starts_with("\x1b[1;31mdirty\x1b[0m"));
        assert_eq!(strip_ansi_codes(&colored_text), plain_text);
    }

    #[test]
    fn test_file_sink_writes_plain_text() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let target = temp_dir.path().join("report.txt");
        Sink::File(target.clone()).deliver("1 tracked repositories: all up-to-date\n")?;
        assert_eq!(
            std::fs::read_to_string(target)?,
            "1 tracked repositories: all up-to-date\n"
        );
        Ok(())
    }
}
