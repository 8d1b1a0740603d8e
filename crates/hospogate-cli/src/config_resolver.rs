//! Locates and loads the hospogate configuration.
//!
//! Lookup stops at the first hit:
//!
//! 1. `--config` (or `HOSPOGATE_CONFIG`), used as given
//! 2. `hospogate.toml` or `.hospogate.toml` in the analyzed path or the
//!    nearest ancestor directory that has one
//! 3. `config.toml` in the user directory: `$HOSPOGATE_CONFIG_DIR`, else
//!    `~/.hospogate`
//!
//! With no hit the built-in defaults apply.

use anyhow::{Context, Result};
use hospogate_host::Config;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_CONFIG_NAMES: &[&str] = &["hospogate.toml", ".hospogate.toml"];
const USER_CONFIG_NAME: &str = "config.toml";
const USER_DIR_ENV: &str = "HOSPOGATE_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed on the command line or through `HOSPOGATE_CONFIG`.
    Explicit(PathBuf),
    /// Found next to the analyzed sources.
    Project(PathBuf),
    /// Found in the user configuration directory.
    User(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Finds the configuration for analyzing `target`.
    #[must_use]
    pub fn locate(target: &Path, explicit: Option<&Path>) -> Self {
        Self::locate_in(target, explicit, user_config_dir().as_deref())
    }

    fn locate_in(target: &Path, explicit: Option<&Path>, user_dir: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_path_buf());
        }

        let target = target
            .canonicalize()
            .unwrap_or_else(|_| target.to_path_buf());
        let project = target.ancestors().find_map(|dir| {
            PROJECT_CONFIG_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        });
        if let Some(path) = project {
            return Self::Project(path);
        }

        user_dir
            .map(|dir| dir.join(USER_CONFIG_NAME))
            .filter(|candidate| candidate.is_file())
            .map_or(Self::Default, Self::User)
    }

    /// Path of the configuration file, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Project(path) | Self::User(path) => Some(path),
            Self::Default => None,
        }
    }

    /// Reads the configuration, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            debug!("No config file found; using defaults");
            return Ok(Config::default());
        };
        debug!(source = ?self, "Loading config");
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// `$HOSPOGATE_CONFIG_DIR` when set, otherwise `~/.hospogate`.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(USER_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".hospogate")))
}
