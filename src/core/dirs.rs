use crate::core::error::{GitTrackerError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "git-tracker";

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join(APP_DIR_NAME))
        .ok_or(GitTrackerError::ConfigDirectoryNotFound)
}

/// Every location git-tracker reads or writes, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
    pub tracked_file: PathBuf,
    pub logfile: PathBuf,
    pub settings_file: PathBuf,
}

impl AppPaths {
    pub fn resolve() -> Result<Self> {
        Ok(Self::under(get_config_directory()?))
    }

    /// Layout rooted at an explicit config directory
    pub fn under(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let log_dir = config_dir.join("log");
        Self {
            tracked_file: log_dir.join("tracked-repos"),
            logfile: log_dir.join("logfile"),
            settings_file: config_dir.join("config.json"),
            log_dir,
            config_dir,
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}
