use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sedov-verify",
    about = "Compare a 2D cylindrical Sedov run against the analytic solution",
    version
)]
pub struct Cli {
    /// Root of the simulation source tree (holds Diagnostics/ and Exec/).
    #[arg(value_name = "SIMULATION_ROOT")]
    pub simulation_root: PathBuf,

    /// Plot file to extract the radial profile from.
    #[arg(value_name = "PLOT_FILE")]
    pub plot_file: PathBuf,

    /// Do not run the build; reuse an executable already copied here, or one in the build directory.
    #[arg(long = "skip-build")]
    pub skip_build: bool,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["sedov-verify", "/src/castro", "plt00250"]).unwrap();
        assert_eq!(cli.simulation_root, PathBuf::from("/src/castro"));
        assert_eq!(cli.plot_file, PathBuf::from("plt00250"));
        assert!(!cli.skip_build);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["sedov-verify", "--skip-build", "-vv", "root", "plt"]).unwrap();
        assert!(cli.skip_build);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_missing_plot_file_rejected() {
        assert!(Cli::try_parse_from(["sedov-verify", "root"]).is_err());
    }
}
