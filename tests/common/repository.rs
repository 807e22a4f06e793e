//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories in various states, and an isolated
//! configuration environment for driving the `gittracker` binary.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs git with `args` inside `repo_path`, failing the test setup if git fails
pub fn git(repo_path: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new("git").args(args).current_dir(repo_path).output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn configure(repo_path: &Path) -> anyhow::Result<()> {
    git(repo_path, &["config", "user.name", "Test User"])?;
    git(repo_path, &["config", "user.email", "test@example.com"])?;
    git(repo_path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Initializes a repository named `name` (on branch `main`) at `parent/name`
pub fn init_repo_at(parent: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let repo_path = parent.join(name);
    fs::create_dir_all(&repo_path)?;
    git(&repo_path, &["init"])?;
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    configure(&repo_path)?;
    Ok(dunce::canonicalize(repo_path)?)
}

/// Sets up a fresh repository without commits
pub fn setup_test_repo(name: &str) -> anyhow::Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let path = init_repo_at(temp_dir.path(), name)?;
    Ok(TestRepo { temp_dir, path })
}

/// Sets up a repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit(name: &str) -> anyhow::Result<TestRepo> {
    let repo = setup_test_repo(name)?;
    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;
    Ok(repo)
}

/// Creates a file with specified content in the repository
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> anyhow::Result<()> {
    let target = repo_path.join(filename);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, content)?;
    Ok(())
}

/// Adds a file to the git index
pub fn git_add(repo_path: &Path, filename: &str) -> anyhow::Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

/// Creates a git commit with the specified message
pub fn git_commit(repo_path: &Path, message: &str) -> anyhow::Result<()> {
    git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

/// Commits `count` new files named `<prefix>-<i>.txt`
pub fn commit_files(repo_path: &Path, prefix: &str, count: usize) -> anyhow::Result<()> {
    for i in 0..count {
        let filename = format!("{prefix}-{i}.txt");
        create_file(repo_path, &filename, &format!("{prefix} {i}\n"))?;
        git_add(repo_path, &filename)?;
        git_commit(repo_path, &format!("add {filename}"))?;
    }
    Ok(())
}

/// A repository cloned from a local bare remote, with `main` tracking `origin/main`.
///
/// The remote is a plain directory, so nothing touches the network.
pub struct ClonedRepo {
    pub temp_dir: TempDir,
    pub remote: PathBuf,
    pub path: PathBuf,
}

impl ClonedRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pushes `count` commits to the remote from a second clone, then fetches them here
    pub fn push_from_elsewhere(&self, count: usize) -> anyhow::Result<()> {
        let other = self.temp_dir.path().join("other-clone");
        if !other.exists() {
            git(
                self.temp_dir.path(),
                &["clone", &self.remote.to_string_lossy(), "other-clone"],
            )?;
            configure(&other)?;
        } else {
            git(&other, &["pull"])?;
        }
        commit_files(&other, "upstream", count)?;
        git(&other, &["push", "origin", "main"])?;
        git(&self.path, &["fetch", "origin"])?;
        Ok(())
    }
}

/// Sets up `name` with an initial commit pushed to a bare remote
pub fn setup_cloned_repo(name: &str) -> anyhow::Result<ClonedRepo> {
    let temp_dir = TempDir::new()?;
    let remote = temp_dir.path().join("remote.git");
    fs::create_dir_all(&remote)?;
    git(&remote, &["init", "--bare"])?;
    git(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    let path = init_repo_at(temp_dir.path(), name)?;
    create_file(&path, "initial.txt", "initial content\n")?;
    git_add(&path, "initial.txt")?;
    git_commit(&path, "Initial commit")?;
    git(&path, &["remote", "add", "origin", &remote.to_string_lossy()])?;
    git(&path, &["push", "-u", "origin", "main"])?;

    Ok(ClonedRepo {
        temp_dir,
        remote,
        path,
    })
}

/// Isolated configuration for the binary: `HOME` and `XDG_CONFIG_HOME` point at a temp dir,
/// so the real tracked list is never read or written.
pub struct TestEnv {
    pub config_home: TempDir,
}

impl TestEnv {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            config_home: TempDir::new()?,
        })
    }

    /// A `gittracker` command running inside this environment
    pub fn command(&self) -> anyhow::Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("gittracker")?;
        cmd.env("XDG_CONFIG_HOME", self.config_home.path())
            .env("HOME", self.config_home.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    /// Log directory as reported by `gittracker --log-dir`
    pub fn log_dir(&self) -> anyhow::Result<PathBuf> {
        let output = self.command()?.arg("--log-dir").output()?;
        Ok(PathBuf::from(String::from_utf8(output.stdout)?.trim()))
    }

    pub fn tracked_file(&self) -> anyhow::Result<PathBuf> {
        Ok(self.log_dir()?.join("tracked-repos"))
    }

    /// Writes the tracked list directly, one path per line
    pub fn track(&self, repos: &[&Path]) -> anyhow::Result<()> {
        let tracked_file = self.tracked_file()?;
        if let Some(parent) = tracked_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = repos
            .iter()
            .map(|repo| repo.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        content.push('\n');
        fs::write(tracked_file, content)?;
        Ok(())
    }

    /// Paths currently in the tracked list
    pub fn tracked(&self) -> anyhow::Result<Vec<PathBuf>> {
        let tracked_file = self.tracked_file()?;
        if !tracked_file.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(tracked_file)?
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}
