// src/core/paths.rs

//! Where the configuration lives, and path expansion for user-supplied values.

use crate::constants::{APP_DIR_NAME, CONFIG_FILENAME};
use lazy_static::lazy_static;
use std::path::PathBuf;
use thiserror::Error;

lazy_static! {
    // Computed once; `None` when the platform has no config directory.
    static ref TEST3_CONFIG_DIR: Option<PathBuf> =
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME));
}

/// Failures while expanding a user-supplied path.
#[derive(Error, Debug)]
pub enum PathError {
    /// A `$VAR` in the path is not set, or the home directory is unknown.
    #[error("Failed to expand path '{template}': {message}")]
    Expansion {
        /// The path as written.
        template: String,
        /// What could not be expanded.
        message: String,
    },
}

/// Returns the per-user configuration directory (`~/.config/dotnet-test3` on Linux).
/// The directory is not created.
pub fn get_config_dir() -> Option<PathBuf> {
    TEST3_CONFIG_DIR.clone()
}

/// Returns the default location of `config.toml`, whether or not it exists.
pub fn get_default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
pub fn expand_config_path(template: &str) -> Result<PathBuf, PathError> {
    shellexpand::full(template)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|e| PathError::Expansion {
            template: template.to_string(),
            message: e.to_string(),
        })
}

/// Expands a leading `~` only. Used on option values like `--settings:~/a.runsettings`,
/// which the shell leaves alone because the tilde is not at the start of a word.
pub fn expand_home(value: &str) -> String {
    shellexpand::tilde(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_ends_with_app_dir() {
        if let Some(path) = get_default_config_path() {
            assert!(path.ends_with("dotnet-test3/config.toml"));
        }
    }

    #[test]
    fn test_expand_home_leaves_plain_values_untouched() {
        assert_eq!(expand_home("run.runsettings"), "run.runsettings");
        assert_eq!(expand_home("a/~/b"), "a/~/b");
    }

    #[test]
    fn test_expand_home_replaces_leading_tilde() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_home("~/adapters");
            assert_eq!(PathBuf::from(expanded), home.join("adapters"));
        }
    }

    #[test]
    fn test_expand_config_path_reports_missing_variables() {
        let err = expand_config_path("$TEST3_SURELY_UNDEFINED_VARIABLE/config.toml").unwrap_err();
        assert!(err.to_string().contains("TEST3_SURELY_UNDEFINED_VARIABLE"));
    }
}
