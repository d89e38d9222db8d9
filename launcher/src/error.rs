//! Error types for the Antora launcher.
//!
//! Configuration problems abort the run before any subprocess starts and map
//! to `EX_CONFIG`. Failures of the external tools themselves are not errors
//! here: their exit codes flow straight back to the caller.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for configuration errors (`EX_CONFIG` from `sysexits.h`).
pub const EXIT_CONFIG: i32 = 78;

/// Exit code used by shells when a command cannot be found.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code for any other internal failure.
pub const EXIT_FAILURE: i32 = 1;

/// Errors that can occur while preparing or launching a build.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// `GIT_CREDENTIALS_PATH` names a file that does not exist.
    #[error("credentials file not found: {} (set by GIT_CREDENTIALS_PATH)", path.display())]
    MissingCredentialsFile {
        /// The path that was requested.
        path: PathBuf,
    },

    /// `GITHUB_WORKSPACE` names a directory that does not exist.
    #[error("working directory not found: {} (set by GITHUB_WORKSPACE)", path.display())]
    MissingWorkingDirectory {
        /// The directory that was requested.
        path: PathBuf,
    },

    /// A setting that must be text holds bytes that are not valid Unicode.
    #[error("environment variable {name} is not valid Unicode")]
    NonUnicodeVariable {
        /// Name of the offending variable.
        name: String,
    },

    /// The home directory that holds the credentials store is unknown.
    #[error("could not determine home directory for the credentials store")]
    HomeDirectoryUnavailable,

    /// Reading a credentials file or writing the store failed.
    #[error("failed to {operation} {}", path.display())]
    CredentialStore {
        /// What was being attempted (`read`, `write`, `secure`, ...).
        operation: &'static str,
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The credentials store is readable by group or others.
    #[error("credentials store {path} has insecure permissions {mode:o}; expected 600")]
    InsecurePermissions {
        /// The store path.
        path: Utf8PathBuf,
        /// The permission bits that were found.
        mode: u32,
    },

    /// An external program is not installed or not on `PATH`.
    #[error("{program}: command not found")]
    ProgramNotFound {
        /// Name of the missing program.
        program: String,
    },

    /// An external program could not be started.
    #[error("failed to execute {program}")]
    Spawn {
        /// Name of the program.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl LauncherError {
    /// Returns the process exit code that reports this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use antora_launcher::error::{EXIT_CONFIG, LauncherError};
    ///
    /// let err = LauncherError::MissingCredentialsFile {
    ///     path: "/run/secrets/git".into(),
    /// };
    /// assert_eq!(err.exit_code(), EXIT_CONFIG);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredentialsFile { .. }
            | Self::MissingWorkingDirectory { .. }
            | Self::NonUnicodeVariable { .. } => EXIT_CONFIG,
            Self::ProgramNotFound { .. } => EXIT_NOT_FOUND,
            Self::HomeDirectoryUnavailable
            | Self::CredentialStore { .. }
            | Self::InsecurePermissions { .. }
            | Self::Spawn { .. } => EXIT_FAILURE,
        }
    }
}

/// Result type alias using [`LauncherError`].
pub type Result<T> = std::result::Result<T, LauncherError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn missing_credentials_file_names_the_path() {
        let err = LauncherError::MissingCredentialsFile {
            path: PathBuf::from("/secrets/creds"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/secrets/creds"));
        assert!(msg.contains("GIT_CREDENTIALS_PATH"));
    }

    #[test]
    fn insecure_permissions_reports_octal_mode() {
        let err = LauncherError::InsecurePermissions {
            path: Utf8PathBuf::from("/home/docs/.git-credentials"),
            mode: 0o644,
        };
        assert!(err.to_string().contains("644"));
    }

    #[test]
    fn credential_store_error_preserves_source() {
        let err = LauncherError::CredentialStore {
            operation: "write",
            path: PathBuf::from("/home/docs/.git-credentials"),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.to_string().contains("write"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[rstest]
    #[case::missing_file(
        LauncherError::MissingCredentialsFile { path: PathBuf::from("x") },
        EXIT_CONFIG
    )]
    #[case::missing_workdir(
        LauncherError::MissingWorkingDirectory { path: PathBuf::from("x") },
        EXIT_CONFIG
    )]
    #[case::non_unicode(
        LauncherError::NonUnicodeVariable { name: "ANTORA_EXTENSIONS".to_owned() },
        EXIT_CONFIG
    )]
    #[case::not_found(
        LauncherError::ProgramNotFound { program: "antora".to_owned() },
        EXIT_NOT_FOUND
    )]
    #[case::home(LauncherError::HomeDirectoryUnavailable, EXIT_FAILURE)]
    #[case::spawn(
        LauncherError::Spawn { program: "npm".to_owned(), source: std::io::Error::other("boom") },
        EXIT_FAILURE
    )]
    fn exit_code_matches_error_category(#[case] err: LauncherError, #[case] expected: i32) {
        assert_eq!(err.exit_code(), expected);
    }
}
