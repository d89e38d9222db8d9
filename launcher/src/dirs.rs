//! Directory resolution abstraction.
//!
//! The credentials store lives in the user's home directory. Resolving it
//! through [`BaseDirs`] lets tests point the store at a temporary directory.

use camino::Utf8PathBuf;

/// Resolves platform-specific base directories.
#[cfg_attr(test, mockall::automock)]
pub trait BaseDirs {
    /// Returns the current user's home directory, if it can be determined and
    /// is valid UTF-8.
    fn home_dir(&self) -> Option<Utf8PathBuf>;
}

/// Resolves directories for the current user via `directories-next`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<Utf8PathBuf> {
        directories_next::BaseDirs::new()
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.home_dir().to_path_buf()).ok())
    }
}
