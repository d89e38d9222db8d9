//! Antora launcher library.
//!
//! This crate is the entrypoint of a documentation build container. It
//! configures Git credentials, installs Antora extensions, and runs the
//! `antora` site generator, or hands arbitrary arguments straight to
//! `antora`. It is used by the `antora-launcher` binary and can be driven
//! programmatically for testing.
//!
//! # Modules
//!
//! - [`command`] - External command invocation and exit-code mapping
//! - [`config`] - Build configuration resolved from the environment
//! - [`credentials`] - Credential source selection and the credentials store
//! - [`dirs`] - Directory resolution abstraction for the home directory
//! - [`env`] - Environment variable snapshot and variable names
//! - [`error`] - Semantic error types and exit codes
//! - [`extensions`] - Antora extension installation
//! - [`launcher`] - Launch mode classification and the build pipeline
//! - [`output`] - User-facing progress output

pub mod command;
pub mod config;
pub mod credentials;
pub mod dirs;
pub mod env;
pub mod error;
pub mod extensions;
pub mod launcher;
pub mod output;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
