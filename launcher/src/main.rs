//! Antora launcher CLI entrypoint.
//!
//! With no arguments (or `--help`) this binary configures Git credentials,
//! installs Antora extensions, and runs `antora` against the configured
//! playbook. Any other arguments are handed to `antora` unchanged.

use antora_launcher::command::SystemCommandExecutor;
use antora_launcher::dirs::SystemBaseDirs;
use antora_launcher::env::Environment;
use antora_launcher::error::Result;
use antora_launcher::launcher::BuildLauncher;
use antora_launcher::output::write_stderr_line;
use std::ffi::OsString;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let env = Environment::from_process();
    let executor = SystemCommandExecutor;
    let dirs = SystemBaseDirs;
    let mut stderr = std::io::stderr();

    let run_result = BuildLauncher::new(&executor, &dirs).run(&args, &env, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    std::process::exit(exit_code);
}

/// Installs a stderr log subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        // A subscriber is already installed; keep it.
    }
}

fn exit_code_for_run_result(result: Result<i32>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            write_stderr_line(stderr, format!("antora-launcher: {err}"));
            err.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antora_launcher::error::{EXIT_CONFIG, EXIT_NOT_FOUND, LauncherError};
    use rstest::rstest;

    #[rstest]
    #[case::success(0)]
    #[case::tool_failure(4)]
    fn exit_code_for_run_result_passes_tool_codes_through(#[case] code: i32) {
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Ok(code), &mut stderr), code);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_reports_configuration_errors() {
        let err = LauncherError::MissingCredentialsFile {
            path: "/run/secrets/git-credentials".into(),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, EXIT_CONFIG);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("credentials file not found: /run/secrets/git-credentials"));
    }

    #[test]
    fn exit_code_for_run_result_reports_missing_programs() {
        let err = LauncherError::ProgramNotFound {
            program: "antora".to_owned(),
        };

        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Err(err), &mut stderr), EXIT_NOT_FOUND);
    }
}
