//! The verification pipeline: build, extract, load, plot.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::{analysis, build, config::Config, plot, table::Table};

/// Files produced by a successful run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub executable: PathBuf,
    pub profile: PathBuf,
    pub figure: PathBuf,
    pub profile_rows: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub skip_build: bool,
}

/// Run the pipeline with the current directory as the output location.
pub fn process(cfg: &Config, simulation_root: &Path, plot_file: &Path, opts: Options) -> Result<Outcome> {
    let run_dir = env::current_dir().context("reading current directory")?;
    process_in(cfg, simulation_root, plot_file, &run_dir, opts)
}

/// Run the pipeline writing every output into `run_dir`.
///
/// Relative `simulation_root` and `plot_file` are taken relative to `run_dir`.
pub fn process_in(
    cfg: &Config,
    simulation_root: &Path,
    plot_file: &Path,
    run_dir: &Path,
    opts: Options,
) -> Result<Outcome> {
    let simulation_root = run_dir.join(simulation_root);
    let plot_file = run_dir.join(plot_file);

    let exe = build::ensure_executable(cfg, &simulation_root, run_dir, opts.skip_build)?;

    let profile_path = analysis::extract_profile(&exe, &plot_file, &cfg.profile_out(), run_dir)?;

    // Reference first: a missing solution must stop the run before any drawing.
    let analytic_path = simulation_root.join(cfg.analytic_path());
    let analytic = Table::load(&analytic_path).context("loading analytic solution")?;
    let profile = Table::load(&profile_path).context("loading extracted profile")?;
    info!(
        analytic = %analytic.source().display(),
        analytic_rows = analytic.rows(),
        profile_rows = profile.rows(),
        profile_cols = profile.cols(),
        "tables loaded"
    );

    let panels = plot::build_panels(&analytic, &profile, cfg.x_range())?;
    let figure = run_dir.join(cfg.figure_out());
    plot::render_comparison(&figure, &panels)?;
    info!(figure = %figure.display(), "comparison figure saved");

    Ok(Outcome {
        executable: exe,
        profile: profile_path,
        figure,
        profile_rows: profile.rows(),
    })
}
