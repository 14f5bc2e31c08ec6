use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod configure;
mod figure;
mod info;

/// convstudy - Convergence-Study Toolkit
#[derive(Parser)]
#[command(name = "convstudy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the multi-panel convergence figure for a sweep
    Figure {
        /// Directory holding the diagnostic files
        #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
        data_dir: PathBuf,

        /// Ordered physical domain widths (AU identifiers)
        #[arg(short = 'w', long, value_delimiter = ',', default_value = "1,2,3,4,5")]
        widths: Vec<u32>,

        /// Ordered grid resolutions in cells
        #[arg(
            short = 'r',
            long,
            value_delimiter = ',',
            default_value = "300,900,2700,5400"
        )]
        resolutions: Vec<u32>,

        /// Output image path
        #[arg(value_name = "OUTPUT", default_value = "fig_convergence_instability.png")]
        output: PathBuf,

        /// Skip unreadable diagnostics instead of aborting the figure
        #[arg(long)]
        best_effort: bool,

        /// Override the X axis label
        #[arg(long, value_name = "TEXT")]
        x_label: Option<String>,

        /// Override the Y axis label
        #[arg(long, value_name = "TEXT")]
        y_label: Option<String>,
    },

    /// Display information about one diagnostic file
    Info {
        /// Input diagnostic file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Check a sweep directory for missing or malformed diagnostics
    Check {
        /// Directory holding the diagnostic files
        #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
        data_dir: PathBuf,

        /// Ordered physical domain widths (AU identifiers)
        #[arg(short = 'w', long, value_delimiter = ',', default_value = "1,2,3,4,5")]
        widths: Vec<u32>,

        /// Ordered grid resolutions in cells
        #[arg(
            short = 'r',
            long,
            value_delimiter = ',',
            default_value = "300,900,2700,5400"
        )]
        resolutions: Vec<u32>,
    },

    /// Print the reproducible CMake configuration command for a run
    Configure {
        /// Load run options from a TOML file (defaults to the Bondi preset)
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Figure {
            data_dir,
            widths,
            resolutions,
            output,
            best_effort,
            x_label,
            y_label,
        } => figure::run(
            data_dir,
            widths,
            resolutions,
            output,
            best_effort,
            x_label,
            y_label,
        ),
        Commands::Info { file } => info::run(file),
        Commands::Check {
            data_dir,
            widths,
            resolutions,
        } => check::run(data_dir, widths, resolutions),
        Commands::Configure { options } => configure::run(options),
    }
}
