//! External command execution utilities.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::VerifyError;

/// Run `program` with `args` in `cwd`, waiting for completion.
///
/// Stdout and stderr are captured rather than inherited: build chatter is
/// logged at debug level, and stderr is attached to the error when the
/// command exits unsuccessfully.
pub fn run_checked<S: AsRef<str>>(program: &str, args: &[S], cwd: &Path) -> Result<Output> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    debug!(program, ?args, cwd = %cwd.display(), "running command");

    let output = Command::new(program)
        .args(&args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("failed to start '{}' in {}", program, cwd.display()))?;

    log_stream("stdout", &output.stdout);
    log_stream("stderr", &output.stderr);

    if !output.status.success() {
        return Err(VerifyError::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into());
    }
    Ok(output)
}

fn log_stream(name: &str, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    for line in String::from_utf8_lossy(bytes).lines() {
        debug!(stream = name, "{}", line);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_success_returns_output() {
        let out = run_checked("sh", &["-c", "echo hello"], Path::new(".")).unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_command_failed() {
        let err = run_checked("sh", &["-c", "echo boom >&2; exit 3"], Path::new("."))
            .unwrap_err();
        match err.downcast_ref::<VerifyError>() {
            Some(VerifyError::CommandFailed { program, status, stderr }) => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
                assert!(stderr.contains("boom"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_fails_to_start() {
        let err = run_checked::<&str>("definitely-not-a-real-program-xyz", &[], Path::new("."))
            .unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn test_runs_in_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_checked("sh", &["-c", "pwd"], dir.path()).unwrap();
        let printed = String::from_utf8_lossy(&out.stdout).trim().to_string();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(Path::new(&printed).canonicalize().unwrap(), expected);
    }
}
