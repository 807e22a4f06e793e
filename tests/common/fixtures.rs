//! Test data generation utilities and predefined scenarios
//!
//! Provides functions for creating repositories in the states the status report
//! distinguishes: in sync, diverged, dirty, detached, and with submodules.

#![allow(dead_code)]

use super::repository::*;

/// Scenario: repository with staged, unstaged and untracked changes
///
/// - staged: new file `staged.txt`
/// - unstaged: modified `initial.txt`
/// - untracked: `scratch.txt`
pub fn create_dirty_repo(name: &str) -> anyhow::Result<TestRepo> {
    let repo = setup_test_repo_with_initial_commit(name)?;
    create_file(&repo.path, "staged.txt", "staged\n")?;
    git_add(&repo.path, "staged.txt")?;
    create_file(&repo.path, "initial.txt", "changed\n")?;
    create_file(&repo.path, "scratch.txt", "scratch\n")?;
    Ok(repo)
}

/// Scenario: tracking repository `ahead` commits ahead of and `behind` commits behind origin
pub fn create_diverged_repo(name: &str, ahead: usize, behind: usize) -> anyhow::Result<ClonedRepo> {
    let repo = setup_cloned_repo(name)?;
    if behind > 0 {
        repo.push_from_elsewhere(behind)?;
    }
    commit_files(&repo.path, "local", ahead)?;
    Ok(repo)
}

/// Scenario: HEAD detached from `main`, then `new_commits` commits made on top
pub fn create_detached_repo(name: &str, new_commits: usize) -> anyhow::Result<TestRepo> {
    let repo = setup_test_repo_with_initial_commit(name)?;
    git(&repo.path, &["checkout", "--detach"])?;
    commit_files(&repo.path, "detached", new_commits)?;
    Ok(repo)
}

/// Scenario: superproject with one clean submodule checked out at `libs/sub`
pub fn create_repo_with_submodule(name: &str) -> anyhow::Result<TestRepo> {
    let repo = setup_test_repo_with_initial_commit(name)?;
    let library = init_repo_at(repo.temp_dir.path(), "library")?;
    commit_files(&library, "lib", 1)?;

    git(
        &repo.path,
        &[
            "-c",
            "protocol.file.allow=always",
            "submodule",
            "add",
            &library.to_string_lossy(),
            "libs/sub",
        ],
    )?;
    git_commit(&repo.path, "add submodule")?;

    // `submodule add` checks out the commit, not the branch
    git(&repo.path.join("libs/sub"), &["checkout", "main"])?;
    Ok(repo)
}
