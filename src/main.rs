mod analysis;
mod build;
mod cli;
mod config;
mod error;
mod orchestrator;
mod plot;
mod printer;
mod table;
mod utils;

use anyhow::Result;
use config::Config;
use orchestrator::Options;
use printer::TextPrinter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = Config::load();
    tracing::debug!(config = %cfg.config_path.display(), "configuration loaded");

    let opts = Options { skip_build: args.skip_build };
    let outcome = orchestrator::process(&cfg, &args.simulation_root, &args.plot_file, opts)?;

    let printer = TextPrinter::default();
    printer.print(&format!(
        "analysis routine: {}",
        outcome.executable.display()
    ));
    printer.print(&format!(
        "profile: {} ({} rows)",
        outcome.profile.display(),
        outcome.profile_rows
    ));
    printer.print(&format!("figure: {}", outcome.figure.display()));
    Ok(())
}
