//! Antora extension installation.
//!
//! Extensions named in `ANTORA_EXTENSIONS` are installed globally with `npm`
//! in a single batch so the generator can `require` them.

use crate::command::{CommandExecutor, Invocation};
use crate::env::{ANTORA_EXTENSIONS, Environment};
use crate::error::Result;
use std::fmt;
use std::process::ExitStatus;

/// The host package manager.
pub const PACKAGE_MANAGER: &str = "npm";

/// An ordered, non-empty list of package identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionList {
    packages: Vec<String>,
}

impl ExtensionList {
    /// Splits `raw` on whitespace. Returns `None` if no packages remain.
    ///
    /// # Examples
    ///
    /// ```
    /// use antora_launcher::extensions::ExtensionList;
    ///
    /// let list = ExtensionList::parse("@antora/lunr-extension  asciidoctor-kroki")
    ///     .expect("two packages");
    /// assert_eq!(list.packages(), ["@antora/lunr-extension", "asciidoctor-kroki"]);
    /// assert!(ExtensionList::parse("   ").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let packages: Vec<String> = raw.split_whitespace().map(str::to_owned).collect();
        if packages.is_empty() {
            None
        } else {
            Some(Self { packages })
        }
    }

    /// Reads the list from `ANTORA_EXTENSIONS`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::LauncherError::NonUnicodeVariable`] if the
    /// variable is not valid Unicode, since package names cannot be split
    /// reliably otherwise.
    pub fn from_env(env: &Environment) -> Result<Option<Self>> {
        Ok(env.get(ANTORA_EXTENSIONS)?.and_then(Self::parse))
    }

    /// The packages, in the order given.
    #[must_use]
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// `npm install -g <package>...`
    #[must_use]
    pub fn install_invocation(&self) -> Invocation {
        Invocation::new(PACKAGE_MANAGER)
            .args(["install", "-g"])
            .args(&self.packages)
    }
}

impl fmt::Display for ExtensionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.packages.join(" "))
    }
}

/// Installs every package in `list` with one package-manager call.
///
/// # Errors
///
/// Returns an error if the package manager cannot be started. A failed
/// install is reported through the returned status.
pub fn install_extensions(
    executor: &dyn CommandExecutor,
    list: &ExtensionList,
) -> Result<ExitStatus> {
    executor.run(&list.install_invocation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MockCommandExecutor;
    use crate::test_utils::exit_status;
    use rstest::rstest;

    #[rstest]
    #[case::single("@antora/lunr-extension", &["@antora/lunr-extension"])]
    #[case::spaces("a  b", &["a", "b"])]
    #[case::tabs_and_newlines("a\tb\nc", &["a", "b", "c"])]
    #[case::padded("  a b  ", &["a", "b"])]
    fn parse_splits_on_whitespace(#[case] raw: &str, #[case] expected: &[&str]) {
        let list = ExtensionList::parse(raw).expect("list should parse");
        assert_eq!(list.packages(), expected);
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(ExtensionList::parse("").is_none());
        assert!(ExtensionList::parse(" \t\n").is_none());
    }

    #[test]
    fn from_env_is_none_when_unset() {
        let list = ExtensionList::from_env(&Environment::default()).expect("unset is valid");
        assert!(list.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn from_env_rejects_non_unicode_package_lists() {
        use crate::error::{EXIT_CONFIG, LauncherError};
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let env =
            Environment::default().with(ANTORA_EXTENSIONS, OsStr::from_bytes(b"lunr-\xff"));
        let err = ExtensionList::from_env(&env).expect_err("non-Unicode list must fail");
        assert!(matches!(
            &err,
            LauncherError::NonUnicodeVariable { name } if name == ANTORA_EXTENSIONS
        ));
        assert_eq!(err.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn install_invocation_batches_all_packages() {
        let list = ExtensionList::parse("@antora/lunr-extension @antora/pdf-extension")
            .expect("list should parse");
        assert_eq!(
            list.install_invocation().to_string(),
            "npm install -g @antora/lunr-extension @antora/pdf-extension"
        );
    }

    #[test]
    fn install_extensions_reports_package_manager_status() {
        let list = ExtensionList::parse("broken-package").expect("list should parse");
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_run()
            .withf(|invocation| invocation.program() == PACKAGE_MANAGER)
            .times(1)
            .returning(|_| Ok(exit_status(1)));

        let status = install_extensions(&executor, &list).expect("npm should start");
        assert_eq!(status.code(), Some(1));
    }
}
