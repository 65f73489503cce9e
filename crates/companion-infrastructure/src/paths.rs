//! Unified path management for companion files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/companion/         # Root (platform config dir + "companion")
//! ├── config.toml              # Engine settings, keyword overrides, user personas
//! ├── sessions/                # One TOML snapshot per session
//! │   └── <session-id>.toml
//! └── logs/                    # Application logs
//!     └── companion.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR_NAME: &str = "companion";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

/// Resolves every file location from a single root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionPaths {
    root: PathBuf,
}

impl CompanionPaths {
    /// Uses the platform config directory (e.g. `~/.config/companion/`).
    pub fn default_location() -> Result<Self, PathError> {
        dirs::config_dir()
            .map(|dir| Self::at(dir.join(APP_DIR_NAME)))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Uses an explicit root directory (tests, portable installs).
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("sessions")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
