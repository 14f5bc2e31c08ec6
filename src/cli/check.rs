use anyhow::Result;
use log::info;
use std::path::PathBuf;

use convstudy::check::check_sweep;

/// Check a sweep directory for missing or malformed diagnostics
pub fn run(data_dir: PathBuf, widths: Vec<u32>, resolutions: Vec<u32>) -> Result<()> {
    info!("Checking sweep in {}", data_dir.display());

    let report = check_sweep(&data_dir, &widths, &resolutions);

    // Use colorized output if available
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    // Exit with error code if the sweep is incomplete
    if !report.is_complete() {
        std::process::exit(1);
    }

    Ok(())
}
