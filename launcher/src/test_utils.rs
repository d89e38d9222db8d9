//! Shared test utilities for the launcher crate.

use crate::command::{CommandExecutor, Invocation};
use crate::dirs::BaseDirs;
use crate::error::Result;
use camino::Utf8PathBuf;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// A command invocation captured by [`StubExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The program that was invoked.
    pub program: String,
    /// Arguments exactly as they were passed.
    pub args: Vec<OsString>,
    /// The working directory, if one was set.
    pub current_dir: Option<PathBuf>,
    /// Whether the call would have replaced the current process.
    pub replaced: bool,
}

impl RecordedCall {
    /// The arguments converted lossily to strings.
    #[must_use]
    pub fn lossy_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    fn from_invocation(invocation: &Invocation, replaced: bool) -> Self {
        Self {
            program: invocation.program().to_owned(),
            args: invocation.arguments().to_vec(),
            current_dir: invocation.working_dir().map(Path::to_path_buf),
            replaced,
        }
    }
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Records every invocation and answers each one with the next queued exit
/// code, or `0` once the queue is empty.
#[derive(Debug, Default)]
pub struct StubExecutor {
    exit_codes: RefCell<VecDeque<i32>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl StubExecutor {
    /// Creates a stub where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stub answering calls with `codes` in order.
    #[must_use]
    pub fn with_exit_codes(codes: impl IntoIterator<Item = i32>) -> Self {
        Self {
            exit_codes: RefCell::new(codes.into_iter().collect()),
            calls: RefCell::default(),
        }
    }

    /// Returns the recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Returns the recorded programs in order.
    #[must_use]
    pub fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.program.clone())
            .collect()
    }

    fn record(&self, invocation: &Invocation, replaced: bool) -> ExitStatus {
        self.calls
            .borrow_mut()
            .push(RecordedCall::from_invocation(invocation, replaced));
        let code = self.exit_codes.borrow_mut().pop_front().unwrap_or(0);
        exit_status(code)
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        Ok(self.record(invocation, false))
    }

    fn exec(&self, invocation: &Invocation) -> Result<ExitStatus> {
        Ok(self.record(invocation, true))
    }
}

/// A `BaseDirs` implementation with a fixed home directory.
#[derive(Debug, Clone, Default)]
pub struct FixedBaseDirs {
    home: Option<Utf8PathBuf>,
}

impl FixedBaseDirs {
    /// Resolves the home directory to `home`.
    #[must_use]
    pub fn new(home: impl Into<Utf8PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Reports that no home directory can be determined.
    #[must_use]
    pub const fn without_home() -> Self {
        Self { home: None }
    }
}

impl BaseDirs for FixedBaseDirs {
    fn home_dir(&self) -> Option<Utf8PathBuf> {
        self.home.clone()
    }
}
