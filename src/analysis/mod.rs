//! Run the staged analysis executable in profile mode.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{error::VerifyError, utils::run_checked};

/// Profile-mode argument list: `-p <plot_file> -s <out>`.
pub fn profile_args(plot_file: &Path, out: &Path) -> Vec<String> {
    vec![
        "-p".to_string(),
        plot_file.to_string_lossy().into_owned(),
        "-s".to_string(),
        out.to_string_lossy().into_owned(),
    ]
}

/// Extract the averaged radial profile of `plot_file` into `run_dir/out`.
pub fn extract_profile(exe: &Path, plot_file: &Path, out: &Path, run_dir: &Path) -> Result<PathBuf> {
    if !plot_file.exists() {
        return Err(VerifyError::MissingInput { path: plot_file.to_path_buf() }.into());
    }

    let exe = exe
        .canonicalize()
        .with_context(|| format!("resolving {}", exe.display()))?;
    let out_path = run_dir.join(out);

    // A stale profile from an earlier run must not pass for this run's output.
    match fs::remove_file(&out_path) {
        Ok(()) => debug!(out = %out_path.display(), "removed previous profile"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("removing stale {}", out_path.display()));
        }
    }

    info!(plot_file = %plot_file.display(), out = %out_path.display(), "extracting profile");
    let program = exe.to_string_lossy();
    run_checked(&program, &profile_args(plot_file, out), run_dir)
        .with_context(|| format!("extracting profile from {}", plot_file.display()))?;

    if !out_path.is_file() {
        return Err(VerifyError::MissingOutput { path: out_path }.into());
    }
    Ok(out_path)
}
