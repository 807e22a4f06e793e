//! Git repository access for status collection.
//!
//! This module provides [`GitRepo`], a thin wrapper around `git2` exposing exactly the
//! capabilities the collector needs: resolving HEAD, finding a branch's upstream, counting
//! commits between two points, reading the HEAD reflog, diffing HEAD against the index and
//! the index against the working tree, listing untracked files and opening submodules.
//!
//! # Public API
//! - [`GitRepo`]: Repository handle used by the collector
//! - [`short_sha`]: Seven-character abbreviation of an object id

use crate::core::{
    change_type::ChangeType,
    error::{GitTrackerError, Result},
    status::{StagedFile, UnstagedFile},
};
use git2::{
    BranchType, DiffFindOptions, DiffOptions, ErrorCode, Oid, Reference, Repository,
    StatusOptions,
};
use std::path::{Path, PathBuf};

const SHORT_SHA_LEN: usize = 7;
const CHECKOUT_PREFIX: &str = "checkout: moving from ";

/// Abbreviate an object id to seven hex characters
pub fn short_sha(oid: Oid) -> String {
    let full = oid.to_string();
    full[..SHORT_SHA_LEN.min(full.len())].to_string()
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the repository rooted at `path` (no upward discovery)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(GitRepo { repo })
    }

    pub fn from_repository(repo: Repository) -> Self {
        GitRepo { repo }
    }

    /// Working directory of the repository, or the git directory for bare repositories
    pub fn root(&self) -> PathBuf {
        self.repo
            .workdir()
            .unwrap_or_else(|| self.repo.path())
            .to_path_buf()
    }

    fn head(&self) -> Result<Reference<'_>> {
        match self.repo.head() {
            Ok(head) => Ok(head),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Err(GitTrackerError::empty_repository(self.root()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Commit HEAD points at; fails with `EmptyRepository` when there are no commits
    pub fn head_oid(&self) -> Result<Oid> {
        let head = self.head()?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id())
    }

    pub fn is_head_detached(&self) -> Result<bool> {
        // Resolve HEAD first so an empty repository surfaces as EmptyRepository
        self.head()?;
        Ok(self.repo.head_detached()?)
    }

    pub fn current_branch(&self) -> Result<String> {
        let head = self.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    /// Upstream of a local branch as (shorthand name, tip), or `None` when it has none
    pub fn upstream_of(&self, branch_name: &str) -> Result<Option<(String, Oid)>> {
        let local_branch = self.repo.find_branch(branch_name, BranchType::Local)?;

        let upstream_branch = match local_branch.upstream() {
            Ok(upstream) => upstream,
            Err(e) => {
                log::debug!("no upstream for {branch_name}: {e}");
                return Ok(None);
            }
        };

        let upstream_name = upstream_branch.name()?.unwrap_or_default().to_string();

        match upstream_branch.get().target() {
            Some(oid) => Ok(Some((upstream_name, oid))),
            None => Ok(None),
        }
    }

    /// Number of commits reachable from `include` but not from `exclude`
    pub fn count_commits(&self, include: Oid, exclude: Oid) -> Result<usize> {
        if include == exclude {
            return Ok(0);
        }

        let mut walk = self.repo.revwalk()?;
        walk.push(include)?;
        walk.hide(exclude)?;

        let mut count = 0;
        for oid in walk {
            oid?;
            count += 1;
        }
        Ok(count)
    }

    /// Commits on `local` missing from `upstream`, and the reverse, counted separately
    pub fn ahead_behind(&self, local: Oid, upstream: Oid) -> Result<(usize, usize)> {
        let ahead = self.count_commits(local, upstream)?;
        let behind = self.count_commits(upstream, local)?;
        Ok((ahead, behind))
    }

    /// Where a detached HEAD came from, read from the HEAD reflog.
    ///
    /// Returns the branch named by the most recent checkout that left a branch, and the commit
    /// the most recent checkout of any kind landed on. Moving between detached commits resets
    /// the landing point but keeps the branch. `None` when the reflog holds no checkout away
    /// from a branch.
    pub fn detach_point(&self) -> Result<Option<(String, Oid)>> {
        let reflog = self.repo.reflog("HEAD")?;
        let mut landed_on = None;

        // Entry 0 is the newest
        for entry in reflog.iter() {
            let Some(message) = entry.message() else {
                continue;
            };
            let Some((from, _to)) = parse_checkout_message(message) else {
                continue;
            };
            let landing = *landed_on.get_or_insert(entry.id_new());
            if self.names_branch(from) {
                return Ok(Some((from.to_string(), landing)));
            }
        }

        Ok(None)
    }

    fn names_branch(&self, name: &str) -> bool {
        self.repo.find_branch(name, BranchType::Local).is_ok() || !looks_like_sha(name)
    }

    /// Best guess at the repository's main branch, used when the reflog cannot tell.
    ///
    /// Tries `origin/HEAD`, then the only local branch, then `init.defaultBranch`, and
    /// finally `master`.
    pub fn default_branch_name(&self) -> String {
        if let Some(name) = self.remote_default_branch() {
            return name;
        }

        if let Ok(branches) = self.repo.branches(Some(BranchType::Local)) {
            let names: Vec<String> = branches
                .filter_map(|branch| branch.ok())
                .filter_map(|(branch, _)| branch.name().ok().flatten().map(str::to_string))
                .collect();
            if let [only] = names.as_slice() {
                return only.clone();
            }
        }

        self.repo
            .config()
            .and_then(|config| config.get_string("init.defaultBranch"))
            .unwrap_or_else(|_| "master".to_string())
    }

    fn remote_default_branch(&self) -> Option<String> {
        let reference = self.repo.find_reference("refs/remotes/origin/HEAD").ok()?;
        let target = reference.symbolic_target()?;
        target
            .strip_prefix("refs/remotes/origin/")
            .map(str::to_string)
    }

    /// Changes between the HEAD commit and the index
    pub fn staged_changes(&self) -> Result<Vec<StagedFile>> {
        let tree = self.head()?.peel_to_tree()?;
        let mut diff = self.repo.diff_tree_to_index(Some(&tree), None, None)?;
        diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            let Some(change) = delta_change(delta.status()) else {
                continue;
            };
            let new_path = delta_path(delta.new_file().path(), delta.old_file().path());
            let old_path = delta_path(delta.old_file().path(), delta.new_file().path());
            files.push(StagedFile {
                change,
                old_path,
                new_path,
            });
        }
        Ok(files)
    }

    /// Changes between the index and the working tree, untracked files excluded
    pub fn unstaged_changes(&self) -> Result<Vec<UnstagedFile>> {
        let mut opts = DiffOptions::new();
        opts.include_untracked(false);
        let diff = self.repo.diff_index_to_workdir(None, Some(&mut opts))?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            let Some(change) = delta_change(delta.status()) else {
                continue;
            };
            files.push(UnstagedFile {
                change,
                path: delta_path(delta.new_file().path(), delta.old_file().path()),
            });
        }
        Ok(files)
    }

    /// Files in the working tree that are neither tracked nor ignored
    pub fn untracked_files(&self) -> Result<Vec<PathBuf>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        opts.recurse_untracked_dirs(true);
        opts.include_ignored(false);
        opts.exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut files = Vec::new();

        for entry in statuses.iter() {
            if entry.status().contains(git2::Status::WT_NEW) {
                files.push(PathBuf::from(String::from_utf8_lossy(entry.path_bytes()).as_ref()));
            }
        }

        files.sort();
        Ok(files)
    }

    /// Submodules in superproject order
    pub fn submodules(&self) -> Result<Vec<SubmoduleCheckout>> {
        let mut found = Vec::new();

        for submodule in self.repo.submodules()? {
            let path = submodule.path().to_path_buf();
            let recorded = submodule.head_id();
            let repo = match submodule.open() {
                Ok(repo) => Some(GitRepo::from_repository(repo)),
                Err(e) => {
                    log::debug!("submodule {} not initialized: {e}", path.display());
                    None
                }
            };
            found.push(SubmoduleCheckout {
                path,
                repo,
                recorded,
            });
        }

        Ok(found)
    }
}

/// A submodule as the superproject sees it
pub struct SubmoduleCheckout {
    /// Path relative to the superproject root
    pub path: PathBuf,
    /// The checked-out repository, `None` when not initialized
    pub repo: Option<GitRepo>,
    /// Commit the superproject's HEAD records for the submodule
    pub recorded: Option<Oid>,
}

fn delta_change(delta: git2::Delta) -> Option<ChangeType> {
    match delta {
        // An unresolved conflict still leaves the file modified in the working tree
        git2::Delta::Conflicted => Some(ChangeType::Modified),
        other => ChangeType::from_delta(other),
    }
}

fn delta_path(primary: Option<&Path>, fallback: Option<&Path>) -> PathBuf {
    primary.or(fallback).map(Path::to_path_buf).unwrap_or_default()
}

/// Split a reflog message of the form `checkout: moving from <from> to <to>`
fn parse_checkout_message(message: &str) -> Option<(&str, &str)> {
    let rest = message.trim_end().strip_prefix(CHECKOUT_PREFIX)?;
    let (from, to) = rest.rsplit_once(" to ")?;
    Some((from, to))
}

fn looks_like_sha(name: &str) -> bool {
    name.len() >= SHORT_SHA_LEN && name.chars().all(|c| c.is_ascii_hexdigit())
}
