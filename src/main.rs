//! # convstudy
//!
//! Command-line front end for the convergence-study toolkit.
//!
//! ## Usage
//!
//! ```bash
//! # Render the convergence figure for a sweep directory
//! convstudy figure --data-dir runs fig_convergence_instability.png
//!
//! # Check that every diagnostic of the sweep is present and well-formed
//! convstudy check --data-dir runs
//!
//! # Inspect one diagnostic file
//! convstudy info runs/convergence_instability_w1_300_radius.dat
//!
//! # Print the CMake command for the Bondi preset
//! convstudy configure
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
