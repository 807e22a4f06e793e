//! Status collection for a single repository.
//!
//! [`collect_status`] maps a repository path, a [`Verbosity`] and a submodule recursion
//! depth onto a [`RepoStatus`]:
//!
//! 1. **HEAD state**: detached (with the branch and commit it was detached from, found in
//!    the HEAD reflog) or attached (with upstream and ahead/behind counts)
//! 2. **Uncommitted changes**: staged, not staged and untracked counts, plus itemized file
//!    lists at [`Verbosity::Full`]
//! 3. **Submodules**: inspected recursively while the depth allows, at minimal verbosity
//!
//! A repository without commits fails with `EmptyRepository`; the caller decides whether to
//! skip it.

use crate::core::{
    error::{GitTrackerError, Result},
    git::{short_sha, GitRepo},
    status::{
        ChangeCounts, DetachedHead, FileLists, HeadState, RepoStatus, SubmoduleStatus,
        TrackingState, Verbosity,
    },
};
use git2::Oid;
use std::path::{Path, PathBuf};

/// Collect the status of the repository at `path`
pub fn collect_status(path: &Path, verbosity: Verbosity, submodule_depth: usize) -> Result<RepoStatus> {
    let repo = GitRepo::open(path)?;
    collect_from_repo(&repo, path.to_path_buf(), verbosity, submodule_depth)
}

fn collect_from_repo(
    repo: &GitRepo,
    path: PathBuf,
    verbosity: Verbosity,
    submodule_depth: usize,
) -> Result<RepoStatus> {
    log::debug!(
        "collecting {} (verbosity {}, submodule depth {submodule_depth})",
        path.display(),
        verbosity.level()
    );

    let head = if repo.is_head_detached()? {
        HeadState::Detached(detached_head(repo)?)
    } else {
        HeadState::Tracking(tracking_state(repo)?)
    };

    let (changes, files) = collect_changes(repo, verbosity)?;

    let mut status = RepoStatus::new(path, head, changes);
    status.files = files;

    if submodule_depth > 0 {
        status.submodules = collect_submodules(repo, submodule_depth - 1)?;
    }

    Ok(status)
}

fn detached_head(repo: &GitRepo) -> Result<DetachedHead> {
    let head_oid = repo.head_oid()?;
    let hexsha = short_sha(head_oid);

    let (from_branch, ref_oid) = match repo.detach_point()? {
        Some(point) => point,
        None => {
            // Truncated reflog: assume HEAD was detached from the default branch, right here
            log::debug!("no checkout entry in reflog, assuming default branch");
            (repo.default_branch_name(), head_oid)
        }
    };

    if ref_oid == head_oid {
        return Ok(DetachedHead {
            hexsha,
            from_branch,
            ref_sha: None,
            detached_commits: None,
        });
    }

    let detached_commits = repo.count_commits(head_oid, ref_oid)?;
    if detached_commits == 0 {
        // HEAD was moved behind the landing point without another checkout (e.g. `reset`)
        return Ok(DetachedHead {
            hexsha,
            from_branch,
            ref_sha: None,
            detached_commits: None,
        });
    }

    Ok(DetachedHead {
        hexsha,
        from_branch,
        ref_sha: Some(short_sha(ref_oid)),
        detached_commits: Some(detached_commits),
    })
}

fn tracking_state(repo: &GitRepo) -> Result<TrackingState> {
    let local_branch = repo.current_branch()?;

    match repo.upstream_of(&local_branch)? {
        Some((remote_branch, upstream_oid)) => {
            let local_oid = repo.head_oid()?;
            let (ahead, behind) = repo.ahead_behind(local_oid, upstream_oid)?;
            Ok(TrackingState::with_remote(
                local_branch,
                remote_branch,
                ahead,
                behind,
            ))
        }
        None => Ok(TrackingState::untracked(local_branch)),
    }
}

fn collect_changes(repo: &GitRepo, verbosity: Verbosity) -> Result<(ChangeCounts, Option<FileLists>)> {
    let staged = repo.staged_changes()?;
    let not_staged = repo.unstaged_changes()?;
    let untracked = repo.untracked_files()?;

    let counts = ChangeCounts {
        staged: staged.len(),
        not_staged: not_staged.len(),
        untracked: untracked.len(),
    };

    let files = (verbosity == Verbosity::Full).then(|| FileLists {
        staged,
        not_staged,
        untracked,
    });

    Ok((counts, files))
}

fn collect_submodules(
    repo: &GitRepo,
    remaining_depth: usize,
) -> Result<Option<Vec<(PathBuf, SubmoduleStatus)>>> {
    let submodules = repo.submodules()?;
    if submodules.is_empty() {
        return Ok(None);
    }

    let superproject_root = repo.root();
    let mut collected = Vec::with_capacity(submodules.len());

    for submodule in submodules {
        let status = match &submodule.repo {
            None => SubmoduleStatus::NotInitialized,
            Some(sub_repo) => {
                let full_path = superproject_root.join(&submodule.path);
                submodule_status(sub_repo, full_path, submodule.recorded, remaining_depth)?
            }
        };
        collected.push((submodule.path, status));
    }

    Ok(Some(collected))
}

fn submodule_status(
    repo: &GitRepo,
    path: PathBuf,
    recorded: Option<Oid>,
    remaining_depth: usize,
) -> Result<SubmoduleStatus> {
    let detached = match repo.is_head_detached() {
        Ok(detached) => detached,
        // A submodule directory without commits is a stub that was never checked out
        Err(GitTrackerError::EmptyRepository { .. }) => return Ok(SubmoduleStatus::NotInitialized),
        Err(e) => return Err(e),
    };

    if detached {
        let head_oid = repo.head_oid()?;
        return Ok(SubmoduleStatus::Detached {
            hexsha: short_sha(head_oid),
            at_recorded_commit: recorded == Some(head_oid),
        });
    }

    let status = collect_from_repo(repo, path, Verbosity::Minimal, remaining_depth)?;
    Ok(SubmoduleStatus::Status(Box::new(status)))
}
