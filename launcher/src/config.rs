//! Build configuration resolved from the environment.
//!
//! [`resolve_config`] is a pure function: it substitutes defaults for unset
//! variables and never touches the filesystem. Validation of the working
//! directory happens later, immediately before it is used.

use crate::env::{ANTORA_FETCH, ANTORA_LOG_LEVEL, Environment, GITHUB_WORKSPACE, PLAYBOOK};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Playbook used when `PLAYBOOK` is unset.
pub const DEFAULT_PLAYBOOK: &str = "antora-playbook.yml";

/// Antora log level used when `ANTORA_LOG_LEVEL` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Flag asking Antora to fetch remote content sources.
pub const FETCH_FLAG: &str = "--fetch";

/// Flag setting Antora's log level.
pub const LOG_LEVEL_FLAG: &str = "--log-level";

/// Settings for the Antora build step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    playbook: PathBuf,
    fetch: bool,
    log_level: OsString,
    working_dir: Option<PathBuf>,
}

impl BuildConfig {
    /// Path of the playbook, relative to the working directory.
    #[must_use]
    pub fn playbook(&self) -> &Path {
        &self.playbook
    }

    /// Whether `--fetch` is passed to Antora.
    #[must_use]
    pub const fn fetch(&self) -> bool {
        self.fetch
    }

    /// The Antora log level.
    #[must_use]
    pub fn log_level(&self) -> &OsStr {
        &self.log_level
    }

    /// The directory the build runs in, if configured.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Assembles the Antora arguments: `[--fetch] --log-level <level> <playbook>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use antora_launcher::config::resolve_config;
    /// use antora_launcher::env::Environment;
    /// use std::ffi::OsString;
    ///
    /// let config = resolve_config(&Environment::default());
    /// assert_eq!(
    ///     config.build_arguments(),
    ///     ["--fetch", "--log-level", "warn", "antora-playbook.yml"].map(OsString::from)
    /// );
    /// ```
    #[must_use]
    pub fn build_arguments(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(4);
        if self.fetch {
            args.push(OsString::from(FETCH_FLAG));
        }
        args.push(OsString::from(LOG_LEVEL_FLAG));
        args.push(self.log_level.clone());
        args.push(self.playbook.clone().into_os_string());
        args
    }
}

/// Builds a [`BuildConfig`] from environment variables.
///
/// Fetching is enabled unless `ANTORA_FETCH` is set to something other than
/// the exact string `true`. Paths and the log level are taken byte for byte.
#[must_use]
pub fn resolve_config(env: &Environment) -> BuildConfig {
    BuildConfig {
        playbook: PathBuf::from(
            env.get_os(PLAYBOOK)
                .unwrap_or_else(|| OsStr::new(DEFAULT_PLAYBOOK)),
        ),
        fetch: env.get_os(ANTORA_FETCH).is_none_or(|value| value == "true"),
        log_level: env
            .get_os(ANTORA_LOG_LEVEL)
            .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_LEVEL))
            .to_owned(),
        working_dir: env.get_os(GITHUB_WORKSPACE).map(PathBuf::from),
    }
}
