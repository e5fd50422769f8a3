//! Failure taxonomy for the verification pipeline.

use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("no executable matching '{prefix}*{suffix}' found in {}", .dir.display())]
    NoExecutable {
        dir: PathBuf,
        prefix: String,
        suffix: String,
    },

    #[error("command '{program}' failed with {status}{}", stderr_tail(.stderr))]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("input file does not exist: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("expected output file was not produced: {}", .path.display())]
    MissingOutput { path: PathBuf },

    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{}:{line}: expected {expected} columns, found {found}", .path.display())]
    Ragged {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("table has no data rows: {}", .path.display())]
    EmptyTable { path: PathBuf },

    #[error("column {index} out of range for {} ({width} columns)", .path.display())]
    MissingColumn {
        path: PathBuf,
        index: usize,
        width: usize,
    },
}

fn stderr_tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let tail: Vec<&str> = trimmed.lines().rev().take(5).collect();
    let tail: Vec<&str> = tail.into_iter().rev().collect();
    format!("\n{}", tail.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_executable_names_the_pattern() {
        let err = VerifyError::NoExecutable {
            dir: PathBuf::from("/sim/Diagnostics/Sedov"),
            prefix: "fsedov2d".into(),
            suffix: ".exe".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fsedov2d*.exe"), "Got: {}", msg);
        assert!(msg.contains("/sim/Diagnostics/Sedov"));
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let text = "1\n2\n3\n4\n5\n6\n7\n";
        assert_eq!(stderr_tail(text), "\n3\n4\n5\n6\n7");
        assert_eq!(stderr_tail("  \n"), "");
    }
}
