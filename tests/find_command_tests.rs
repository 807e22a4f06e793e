use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

mod common;
use common::repository::*;

/// A search root with `code/alpha`, `code/group/beta` and a hidden `code/.dotfiles` repository
fn search_tree() -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let code = temp_dir.path().join("code");
    std::fs::create_dir_all(&code)?;
    let code = dunce::canonicalize(code)?;

    init_repo_at(&code, "alpha")?;
    init_repo_at(&code.join("group"), "beta")?;
    init_repo_at(&code, ".dotfiles")?;
    std::fs::create_dir_all(code.join("notes"))?;

    Ok((temp_dir, code))
}

#[cfg(test)]
mod find_command_tests {
    use super::*;

    #[test]
    fn test_find_tracks_everything_with_yes() -> anyhow::Result<()> {
        let env = TestEnv::new()?;
        let (_temp_dir, code) = search_tree()?;

        env.command()?
            .args(["find", "--yes"])
            .arg(&code)
            .assert()
            .success()
            .stdout(predicate::str::contains("found 2 untracked repositories:"))
            .stdout(predicate::str::contains("now tracking 2 more repositories"));

        assert_eq!(
            env.tracked()?,
            vec![code.join("alpha"), code.join("group").join("beta")]
        );
        Ok(())
    }

    #[test]
    fn test_find_hidden_directories_on_request() -> anyhow::Result<()> {
        let env = TestEnv::new()?;
        let (_temp_dir, code) = search_tree()?;

        env.command()?
            .args(["search", "--yes", "--search-hidden"])
            .arg(&code)
            .assert()
            .success()
            .stdout(predicate::str::contains("found 3 untracked repositories:"));

        assert!(env.tracked()?.contains(&code.join(".dotfiles")));
        Ok(())
    }

    #[test]
    fn test_find_respects_ignore() -> anyhow::Result<()> {
        let env = TestEnv::new()?;
        let (_temp_dir, code) = search_tree()?;

        env.command()?
            .args(["find", "--yes", "-i", "group"])
            .arg(&code)
            .assert()
            .success()
            .stdout(predicate::str::contains("found 1 untracked repositories:"));

        assert_eq!(env.tracked()?, vec![code.join("alpha")]);
        Ok(())
    }

    #[test]
    fn test_find_skips_tracked_repositories() -> anyhow::Result<()> {
        let env = TestEnv::new()?;
        let (_temp_dir, code) = search_tree()?;
        let alpha = code.join("alpha");
        env.track(&[alpha.as_path()])?;

        env.command()?
            .args(["find", "--yes"])
            .arg(&code)
            .assert()
            .success()
            .stdout(predicate::str::contains("(already tracked)"))
            .stdout(predicate::str::contains("now tracking 1 more repositories"));

        assert_eq!(env.tracked()?, vec![alpha, code.join("group").join("beta")]);
        Ok(())
    }

    #[test]
    fn test_find_declined_adds_nothing() -> anyhow::Result<()> {
        let env = TestEnv::new()?;
        let (_temp_dir, code) = search_tree()?;

        env.command()?
            .arg("find")
            .arg(&code)
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Do you want GitTracker to track these repositories?"))
            .stdout(predicate::str::contains("no repositories added"));

        assert!(env.tracked()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_find_quiet_prints_no_listing() -> anyhow::Result<()> {
        let env = TestEnv::new()?;
        let (_temp_dir, code) = search_tree()?;

        env.command()?
            .args(["find", "--quiet", "--yes"])
            .arg(&code)
            .assert()
            .success()
            .stdout(predicate::str::contains("untracked repositories:").not());

        assert_eq!(env.tracked()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_find_without_results_fails() -> anyhow::Result<()> {
        let env = TestEnv::new()?;
        let (_temp_dir, code) = search_tree()?;

        env.command()?
            .args(["find", "--yes"])
            .arg(code.join("notes"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("No untracked repositories found under"))
            .stderr(predicate::str::contains("gittracker add <path>"));

        Ok(())
    }

    #[test]
    fn test_find_rejects_missing_root() -> anyhow::Result<()> {
        let env = TestEnv::new()?;
        let (_temp_dir, code) = search_tree()?;

        env.command()?
            .args(["find", "--yes"])
            .arg(code.join("nowhere"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot search under"))
            .stderr(predicate::str::contains("not a directory"));

        Ok(())
    }
}
