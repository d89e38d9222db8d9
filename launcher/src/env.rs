//! Snapshot of the process environment.
//!
//! The launcher reads its whole configuration from environment variables. They
//! are captured once into an [`Environment`] so that the parsing functions in
//! [`crate::config`], [`crate::credentials`], and [`crate::extensions`] stay
//! pure and can be driven from tests without touching the real process state.

use crate::error::{LauncherError, Result};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// Raw credentials-file content. Highest priority credential source.
pub const GIT_CREDENTIALS: &str = "GIT_CREDENTIALS";
/// Path of a credentials file to copy into the store.
pub const GIT_CREDENTIALS_PATH: &str = "GIT_CREDENTIALS_PATH";
/// Token used to synthesise a GitHub HTTPS credential line.
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Space-separated Antora extension packages to install.
pub const ANTORA_EXTENSIONS: &str = "ANTORA_EXTENSIONS";
/// Path of the Antora playbook.
pub const PLAYBOOK: &str = "PLAYBOOK";
/// Whether to pass `--fetch` to Antora.
pub const ANTORA_FETCH: &str = "ANTORA_FETCH";
/// Log level passed to Antora.
pub const ANTORA_LOG_LEVEL: &str = "ANTORA_LOG_LEVEL";
/// Directory the build runs in.
pub const GITHUB_WORKSPACE: &str = "GITHUB_WORKSPACE";

/// An immutable set of environment variables.
///
/// Values are kept as raw OS strings so that paths, credentials, and
/// arguments reach the filesystem and child processes byte for byte.
/// Variables set to the empty string are reported as absent, matching
/// `${VAR:-default}` in a shell.
///
/// # Examples
///
/// ```
/// use antora_launcher::env::Environment;
/// use std::ffi::OsStr;
///
/// let env: Environment = [("PLAYBOOK", "docs/site.yml"), ("GITHUB_TOKEN", "")]
///     .into_iter()
///     .collect();
/// assert_eq!(env.get_os("PLAYBOOK"), Some(OsStr::new("docs/site.yml")));
/// assert_eq!(env.get_os("GITHUB_TOKEN"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, OsString>,
}

impl Environment {
    /// Captures the variables of the current process.
    ///
    /// Variables whose name is not valid Unicode cannot be one of the
    /// launcher's settings and are skipped. Values are kept as they are.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| name.into_string().ok().map(|key| (key, value)))
            .collect()
    }

    /// Returns the raw value of `name`, treating an empty value as unset.
    #[must_use]
    pub fn get_os(&self, name: &str) -> Option<&OsStr> {
        self.vars
            .get(name)
            .map(OsString::as_os_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns the value of `name` as text, treating an empty value as unset.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::NonUnicodeVariable`] if the value is set but is
    /// not valid Unicode.
    pub fn get(&self, name: &str) -> Result<Option<&str>> {
        self.get_os(name)
            .map(|value| {
                value.to_str().ok_or_else(|| LauncherError::NonUnicodeVariable {
                    name: name.to_owned(),
                })
            })
            .transpose()
    }

    /// Returns a copy of this environment with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_missing_variable() {
        let env = Environment::default();
        assert_eq!(env.get(PLAYBOOK).expect("unset is not an error"), None);
        assert_eq!(env.get_os(PLAYBOOK), None);
    }

    #[test]
    fn get_treats_empty_value_as_unset() {
        let env = Environment::default().with(GITHUB_TOKEN, "");
        assert_eq!(env.get_os(GITHUB_TOKEN), None);
    }

    #[test]
    fn get_preserves_whitespace_in_values() {
        let env = Environment::default().with(GIT_CREDENTIALS, " line\n");
        assert_eq!(
            env.get(GIT_CREDENTIALS).expect("value is Unicode"),
            Some(" line\n")
        );
    }

    #[test]
    fn from_process_captures_set_variables() {
        temp_env::with_vars(
            [
                ("ANTORA_LAUNCHER_TEST_VALUE", Some("present")),
                ("ANTORA_LAUNCHER_TEST_UNSET", None::<&str>),
            ],
            || {
                let env = Environment::from_process();
                assert_eq!(
                    env.get_os("ANTORA_LAUNCHER_TEST_VALUE"),
                    Some(OsStr::new("present"))
                );
                assert_eq!(env.get_os("ANTORA_LAUNCHER_TEST_UNSET"), None);
            },
        );
    }

    #[cfg(unix)]
    #[test]
    fn from_process_keeps_non_unicode_values() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"docs/s\xffite.yml");
        temp_env::with_var("ANTORA_LAUNCHER_TEST_RAW", Some(raw), || {
            let env = Environment::from_process();
            assert_eq!(env.get_os("ANTORA_LAUNCHER_TEST_RAW"), Some(raw));

            let err = env
                .get("ANTORA_LAUNCHER_TEST_RAW")
                .expect_err("text lookup of a non-Unicode value must fail");
            assert!(matches!(
                err,
                LauncherError::NonUnicodeVariable { name } if name == "ANTORA_LAUNCHER_TEST_RAW"
            ));
        });
    }
}
