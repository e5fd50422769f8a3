//! Build, locate and stage the profile-extraction executable.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{config::Config, error::VerifyError, utils::run_checked};

/// Invoke the build command for the configured program target inside `build_dir`.
pub fn run_build(cfg: &Config, build_dir: &Path) -> Result<()> {
    if !build_dir.is_dir() {
        return Err(VerifyError::MissingInput { path: build_dir.to_path_buf() }.into());
    }
    let mut cmd = cfg.build_command();
    let program = cmd.remove(0);
    cmd.push(format!("programs={}", cfg.program()));

    info!(program = %program, target = %cfg.program(), dir = %build_dir.display(), "building analysis tool");
    run_checked(&program, &cmd, build_dir)
        .with_context(|| format!("building {} in {}", cfg.program(), build_dir.display()))?;
    Ok(())
}

/// First regular file in `dir` whose name starts with `prefix` and ends with `suffix`.
///
/// Candidates are sorted by name so repeated runs pick the same file.
pub fn find_executable(dir: &Path, prefix: &str, suffix: &str) -> Result<PathBuf> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|name| name.starts_with(prefix) && name.ends_with(suffix))
                .unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();
    matches.sort();

    if matches.len() > 1 {
        debug!(candidates = ?matches, "multiple executables match, taking the first");
    }

    matches.into_iter().next().ok_or_else(|| {
        VerifyError::NoExecutable {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
        .into()
    })
}

/// Copy `exe` into `run_dir`, overwriting a previous copy. Permission bits travel with it.
pub fn stage_executable(exe: &Path, run_dir: &Path) -> Result<PathBuf> {
    let name = exe
        .file_name()
        .with_context(|| format!("executable path has no file name: {}", exe.display()))?;
    let dest = run_dir.join(name);
    if same_file(exe, &dest) {
        return Ok(dest);
    }
    fs::copy(exe, &dest)
        .with_context(|| format!("copying {} to {}", exe.display(), dest.display()))?;
    Ok(dest)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Build (unless `skip_build`), locate and copy the analysis executable into `run_dir`.
///
/// With `skip_build`, a copy already sitting in `run_dir` is reused as is.
pub fn ensure_executable(
    cfg: &Config,
    simulation_root: &Path,
    run_dir: &Path,
    skip_build: bool,
) -> Result<PathBuf> {
    let prefix = cfg.exe_prefix();
    let suffix = cfg.exe_suffix();

    if skip_build {
        if let Ok(existing) = find_executable(run_dir, &prefix, &suffix) {
            info!(exe = %existing.display(), "reusing staged analysis tool");
            return Ok(existing);
        }
    }

    let build_dir = simulation_root.join(cfg.build_subdir());
    if !skip_build {
        run_build(cfg, &build_dir)?;
    }

    let exe = find_executable(&build_dir, &prefix, &suffix)?;
    info!(exe = %exe.display(), "analysis routine");
    stage_executable(&exe, run_dir)
}
