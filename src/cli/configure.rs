use anyhow::Result;
use log::info;
use std::path::PathBuf;

use convstudy::configure::RunOptions;

/// Print the reproducible CMake configuration command for a run
pub fn run(options: Option<PathBuf>) -> Result<()> {
    let run_options = match options {
        Some(path) => {
            info!("Loading run options from {}", path.display());
            RunOptions::from_file(&path)?
        }
        None => {
            info!("Using the built-in Bondi preset");
            RunOptions::bondi_preset()
        }
    };

    println!("{}", run_options.cmake_command());
    Ok(())
}
