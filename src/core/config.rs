use crate::core::error::Result;
use crate::core::status::Verbosity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What `status` does when a repository cannot be collected
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Skip,
    Abort,
    Prompt,
}

/// What `find` does when a directory cannot be read
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    Ignore,
    #[default]
    Show,
    Raise,
}

/// User defaults stored in `config.json`; command-line flags take precedence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    pub verbosity: u8,
    pub submodule_depth: usize,
    pub plain: bool,
    pub on_error: ErrorPolicy,
    pub permission_errors: PermissionPolicy,
    pub search_hidden: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default().level(),
            submodule_depth: 0,
            plain: false,
            on_error: ErrorPolicy::default(),
            permission_errors: PermissionPolicy::default(),
            search_hidden: false,
        }
    }
}

impl TrackerConfig {
    pub fn load_or_create(settings_file: &Path) -> Result<Self> {
        if settings_file.exists() {
            let content = std::fs::read_to_string(settings_file)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            let config = Self::default();
            config.save(settings_file)?;
            Ok(config)
        }
    }

    pub fn save(&self, settings_file: &Path) -> Result<()> {
        if let Some(config_dir) = settings_file.parent() {
            std::fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_file, content)?;

        Ok(())
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_level(self.verbosity)
    }
}
