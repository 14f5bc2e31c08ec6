use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use convstudy::aggregate::{aggregate_with, AggregateOptions};
use convstudy::render::{self, FigureStyle};

/// Render the convergence figure for one sweep
#[allow(clippy::too_many_arguments)]
pub fn run(
    data_dir: PathBuf,
    widths: Vec<u32>,
    resolutions: Vec<u32>,
    output: PathBuf,
    best_effort: bool,
    x_label: Option<String>,
    y_label: Option<String>,
) -> Result<()> {
    if !data_dir.is_dir() {
        anyhow::bail!("Data directory does not exist: {}", data_dir.display());
    }
    if widths.is_empty() || resolutions.is_empty() {
        anyhow::bail!("At least one width and one resolution are required");
    }

    info!("convstudy - Convergence Figure");
    info!("==============================");
    info!("Data dir:    {}", data_dir.display());
    info!("Widths:      {widths:?}");
    info!("Resolutions: {resolutions:?}");
    info!("Output:      {}", output.display());

    let options = AggregateOptions { best_effort };
    let panels = aggregate_with(&data_dir, &widths, &resolutions, options)
        .context("Failed to assemble convergence panels")?;

    let mut style = FigureStyle::default();
    if let Some(text) = x_label {
        style.x_label = text;
    }
    if let Some(text) = y_label {
        style.y_label = text;
    }

    render::render(&panels, &output, &style).context("Failed to render figure")?;

    info!("Wrote {}", output.display());
    Ok(())
}
