//! The persisted list of tracked repositories.
//!
//! The list is a UTF-8 text file with one absolute path per line and a trailing newline. It is
//! read wholesale and every mutation is written back by rewriting the whole file.

use crate::core::error::{GitTrackerError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRepos {
    file: PathBuf,
    repos: Vec<PathBuf>,
}

impl TrackedRepos {
    /// Read the list at `file`. A missing file is an empty list.
    pub fn load(file: impl Into<PathBuf>) -> Result<Self> {
        let file = file.into();
        let repos = match std::fs::read_to_string(&file) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("tracked list {} does not exist yet", file.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("loaded {} tracked repositories from {}", repos.len(), file.display());
        Ok(Self { file, repos })
    }

    /// Like [`TrackedRepos::load`], failing with `TrackedListEmpty` when nothing is tracked.
    pub fn load_required(file: impl Into<PathBuf>) -> Result<Self> {
        let tracked = Self::load(file)?;
        if tracked.is_empty() {
            return Err(GitTrackerError::tracked_list_empty(tracked.file));
        }
        Ok(tracked)
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn repos(&self) -> &[PathBuf] {
        &self.repos
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.repos.iter().any(|repo| repo == path)
    }

    pub fn add(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if self.contains(&path) {
            return Err(GitTrackerError::already_tracked(path));
        }
        self.repos.push(path);
        Ok(())
    }

    pub fn remove(&mut self, path: &Path) -> Result<()> {
        let index = self
            .repos
            .iter()
            .position(|repo| repo == path)
            .ok_or_else(|| GitTrackerError::not_tracked(path))?;
        self.repos.remove(index);
        Ok(())
    }

    /// Swap `old` for `new` in place, keeping the list order.
    pub fn replace(&mut self, old: &Path, new: impl Into<PathBuf>) -> Result<()> {
        let new = new.into();
        if old != new.as_path() && self.contains(&new) {
            return Err(GitTrackerError::already_tracked(new));
        }
        let slot = self
            .repos
            .iter_mut()
            .find(|repo| repo.as_path() == old)
            .ok_or_else(|| GitTrackerError::not_tracked(old))?;
        *slot = new;
        Ok(())
    }

    /// Append every path not already tracked; returns how many were added.
    pub fn extend<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            if self.contains(&path) {
                log::debug!("skipping duplicate {}", path.display());
                continue;
            }
            self.repos.push(path);
            added += 1;
        }
        added
    }

    /// Rewrite the list file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut content = self
            .repos
            .iter()
            .map(|repo| repo.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        content.push('\n');

        std::fs::write(&self.file, content)?;
        log::debug!("saved {} tracked repositories to {}", self.repos.len(), self.file.display());
        Ok(())
    }
}
