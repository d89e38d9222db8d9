//! External command invocation.
//!
//! Every subprocess the launcher starts (`git`, `npm`, and `antora`) goes
//! through the [`CommandExecutor`] trait so tests can observe invocations
//! without spawning anything. Children inherit stdin, stdout, and stderr.

use crate::error::{LauncherError, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A program, its arguments, and an optional working directory.
///
/// # Examples
///
/// ```
/// use antora_launcher::command::Invocation;
///
/// let invocation = Invocation::new("antora").args(["--log-level", "warn"]);
/// assert_eq!(invocation.to_string(), "antora --log-level warn");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Creates an invocation of `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the directory the program runs in.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// The program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, in order.
    #[must_use]
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// The working directory, if one was set.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs the invocation to completion and returns its exit status.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::ProgramNotFound`] or [`LauncherError::Spawn`]
    /// if the program could not be started.
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus>;

    /// Replaces the current process with the invocation.
    ///
    /// On Unix this only returns if `exec` failed. Elsewhere the program is
    /// run to completion and its status returned.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::ProgramNotFound`] or [`LauncherError::Spawn`]
    /// if the program could not be started.
    fn exec(&self, invocation: &Invocation) -> Result<ExitStatus>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        invocation
            .to_command()
            .status()
            .map_err(|e| spawn_error(invocation.program(), e))
    }

    #[cfg(unix)]
    fn exec(&self, invocation: &Invocation) -> Result<ExitStatus> {
        use std::os::unix::process::CommandExt;

        let error = invocation.to_command().exec();
        Err(spawn_error(invocation.program(), error))
    }

    #[cfg(not(unix))]
    fn exec(&self, invocation: &Invocation) -> Result<ExitStatus> {
        self.run(invocation)
    }
}

fn spawn_error(program: &str, source: std::io::Error) -> LauncherError {
    if source.kind() == std::io::ErrorKind::NotFound {
        LauncherError::ProgramNotFound {
            program: program.to_owned(),
        }
    } else {
        LauncherError::Spawn {
            program: program.to_owned(),
            source,
        }
    }
}

/// Converts a child's exit status into the launcher's own exit code.
///
/// A normal exit keeps its code. A child killed by a signal on Unix maps to
/// `128 + signal`, as a shell would report it.
#[must_use]
pub fn exit_code_for_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    crate::error::EXIT_FAILURE
}
