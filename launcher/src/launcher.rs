//! The build launcher pipeline.
//!
//! Arguments other than a lone leading `--help` are handed straight to Antora
//! by replacing the current process. Otherwise the standard pipeline runs:
//!
//! 1. configure Git credentials,
//! 2. install Antora extensions,
//! 3. run Antora with arguments assembled from [`BuildConfig`].
//!
//! Each step finishes before the next begins. A non-zero exit from any
//! external tool stops the pipeline and becomes the launcher's exit code.

use crate::command::{CommandExecutor, Invocation, exit_code_for_status};
use crate::config::{BuildConfig, resolve_config};
use crate::credentials::{CredentialSource, CredentialStore};
use crate::dirs::BaseDirs;
use crate::env::Environment;
use crate::error::{LauncherError, Result};
use crate::extensions::{ExtensionList, install_extensions};
use crate::output::write_stderr_line;
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::ops::ControlFlow;

/// The external site generator.
pub const GENERATOR: &str = "antora";

/// The argument that keeps the standard pipeline and asks Antora for help.
pub const HELP_FLAG: &str = "--help";

/// How an invocation of the launcher is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Hand every argument to Antora unchanged.
    Passthrough,
    /// Configure credentials and extensions, then build.
    Standard {
        /// Whether Antora should print its help text.
        help: bool,
    },
}

impl LaunchMode {
    /// Classifies the launcher's command-line arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use antora_launcher::launcher::LaunchMode;
    /// use std::ffi::OsString;
    ///
    /// assert_eq!(LaunchMode::classify(&[]), LaunchMode::Standard { help: false });
    /// assert_eq!(
    ///     LaunchMode::classify(&[OsString::from("--help")]),
    ///     LaunchMode::Standard { help: true }
    /// );
    /// assert_eq!(
    ///     LaunchMode::classify(&[OsString::from("--version")]),
    ///     LaunchMode::Passthrough
    /// );
    /// ```
    #[must_use]
    pub fn classify(args: &[OsString]) -> Self {
        match args.first() {
            None => Self::Standard { help: false },
            Some(first) if first == HELP_FLAG => Self::Standard { help: true },
            Some(_) => Self::Passthrough,
        }
    }
}

/// Assembles the Antora invocation for the standard pipeline.
///
/// With `help`, `--help` is placed first; the playbook stays last.
#[must_use]
pub fn build_invocation(config: &BuildConfig, help: bool) -> Invocation {
    let mut invocation = Invocation::new(GENERATOR);
    if help {
        invocation = invocation.args([HELP_FLAG]);
    }
    invocation = invocation.args(config.build_arguments());
    match config.working_dir() {
        Some(dir) => invocation.current_dir(dir),
        None => invocation,
    }
}

/// Runs the launcher against injected process and directory seams.
pub struct BuildLauncher<'a> {
    executor: &'a dyn CommandExecutor,
    dirs: &'a dyn BaseDirs,
}

impl<'a> BuildLauncher<'a> {
    /// Creates a launcher.
    #[must_use]
    pub const fn new(executor: &'a dyn CommandExecutor, dirs: &'a dyn BaseDirs) -> Self {
        Self { executor, dirs }
    }

    /// Runs the launcher and returns the process exit code.
    ///
    /// Progress messages go to `stderr`.
    ///
    /// # Errors
    ///
    /// Returns an error for configuration problems (a missing credentials file
    /// or working directory, or a non-Unicode extension list), credential
    /// store failures, and programs that cannot be started. Non-zero exits of
    /// external tools are not errors; they are returned as the exit code.
    pub fn run(&self, args: &[OsString], env: &Environment, stderr: &mut dyn Write) -> Result<i32> {
        let help = match LaunchMode::classify(args) {
            LaunchMode::Passthrough => return self.passthrough(args),
            LaunchMode::Standard { help } => help,
        };

        let config = resolve_config(env);
        ensure_working_dir(&config)?;
        let extensions = ExtensionList::from_env(env)?;

        if let ControlFlow::Break(code) = self.configure_credentials(env, stderr)? {
            return Ok(code);
        }
        if let Some(list) = &extensions
            && let ControlFlow::Break(code) = self.provision_extensions(list, stderr)?
        {
            return Ok(code);
        }
        self.build(&config, help, stderr)
    }

    fn passthrough(&self, args: &[OsString]) -> Result<i32> {
        let invocation = Invocation::new(GENERATOR).args(args.iter().cloned());
        debug!("passing {} argument(s) through to {GENERATOR}", args.len());
        let status = self.executor.exec(&invocation)?;
        Ok(exit_code_for_status(status))
    }

    fn configure_credentials(
        &self,
        env: &Environment,
        stderr: &mut dyn Write,
    ) -> Result<ControlFlow<i32>> {
        let source = CredentialSource::resolve(env);
        debug!("resolved credential source {source:?}");

        let Some(contents) = source.load()? else {
            write_stderr_line(stderr, source.describe());
            return Ok(ControlFlow::Continue(()));
        };

        let home = self
            .dirs
            .home_dir()
            .ok_or(LauncherError::HomeDirectoryUnavailable)?;
        let store = CredentialStore::in_home(&home);
        store.write(&contents)?;
        write_stderr_line(stderr, source.describe());

        let status = store.register(self.executor)?;
        Ok(continue_if_success(exit_code_for_status(status)))
    }

    fn provision_extensions(
        &self,
        extensions: &ExtensionList,
        stderr: &mut dyn Write,
    ) -> Result<ControlFlow<i32>> {
        write_stderr_line(stderr, format!("Installing Antora extensions: {extensions}"));
        let status = install_extensions(self.executor, extensions)?;
        Ok(continue_if_success(exit_code_for_status(status)))
    }

    fn build(&self, config: &BuildConfig, help: bool, stderr: &mut dyn Write) -> Result<i32> {
        let invocation = build_invocation(config, help);
        if let Some(dir) = invocation.working_dir() {
            debug!("building in {}", dir.display());
        }
        write_stderr_line(stderr, format!("Running: {invocation}"));
        let status = self.executor.run(&invocation)?;
        Ok(exit_code_for_status(status))
    }
}

fn ensure_working_dir(config: &BuildConfig) -> Result<()> {
    match config.working_dir() {
        Some(dir) if !dir.is_dir() => Err(LauncherError::MissingWorkingDirectory {
            path: dir.to_owned(),
        }),
        _ => Ok(()),
    }
}

const fn continue_if_success(code: i32) -> ControlFlow<i32> {
    if code == 0 {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(code)
    }
}
