//! Multi-panel convergence figure rendering.
//!
//! Draws one vertically stacked subplot per [`WidthPanel`], overlaying every
//! resolution series of that panel, and writes the composed figure to a
//! single bitmap file. All subplots share the same X and Y ranges so panels
//! are directly comparable.
//!
//! Styling is an explicit [`FigureStyle`] value passed by the caller; the
//! renderer holds no process-global state, so repeated invocations in one
//! process cannot interfere. Output is deterministic: identical panels
//! produce identical pixels.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::aggregate::WidthPanel;

/// Styling and labelling for the convergence figure.
///
/// The two horizontal guides mark physically meaningful radii (steady-state
/// and critical thresholds in the study's units); the renderer never computes
/// them.
#[derive(Debug, Clone)]
pub struct FigureStyle {
    /// Output bitmap width in pixels.
    pub width_px: u32,
    /// Output bitmap height in pixels.
    pub height_px: u32,
    /// Font family for captions and labels.
    pub font_family: String,
    /// Caption font size in pixels.
    pub title_font_px: u32,
    /// Y value of the dashed upper guide, in the figure's radius units.
    pub upper_guide_au: f64,
    /// Y value of the solid lower guide, in the figure's radius units.
    pub lower_guide_au: f64,
    /// X axis label, drawn on the bottom panel only.
    pub x_label: String,
    /// Y axis label, drawn on every panel.
    pub y_label: String,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width_px: 1000,
            height_px: 1600,
            font_family: "sans-serif".to_string(),
            title_font_px: 20,
            upper_guide_au: 30.0,
            lower_guide_au: 10.0,
            x_label: "t (yr)".to_string(),
            y_label: "R_I (AU)".to_string(),
        }
    }
}

/// Errors that can occur while rendering the figure
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No panels were supplied
    #[error("cannot render a figure with no panels")]
    NoPanels,

    /// The figure could not be drawn or written to the output path
    #[error("failed to write figure: {0}")]
    Write(String),
}

fn draw_err(err: impl std::fmt::Display) -> RenderError {
    RenderError::Write(err.to_string())
}

/// Render the panels into a single stacked figure at `out_path`.
///
/// Any existing file at `out_path` is overwritten. On failure no usable
/// image is produced.
pub fn render(panels: &[WidthPanel], out_path: &Path, style: &FigureStyle) -> Result<(), RenderError> {
    if panels.is_empty() {
        return Err(RenderError::NoPanels);
    }

    let (x_range, y_range) = shared_ranges(panels, style);

    let root =
        BitMapBackend::new(out_path, (style.width_px, style.height_px)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let areas = root.split_evenly((panels.len(), 1));

    for (i, (panel, area)) in panels.iter().zip(areas.iter()).enumerate() {
        let bottom = i + 1 == panels.len();

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("W = {} AU", panel.width),
                (style.font_family.as_str(), style.title_font_px),
            )
            .margin(10)
            .x_label_area_size(if bottom { 40 } else { 0 })
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), y_range.clone())
            .map_err(draw_err)?;

        {
            let mut mesh = chart.configure_mesh();
            mesh.y_desc(style.y_label.as_str());
            if bottom {
                mesh.x_desc(style.x_label.as_str());
            }
            mesh.draw().map_err(draw_err)?;
        }

        for (j, entry) in panel.series.iter().enumerate() {
            let color = Palette99::pick(j).to_rgba();
            let points = entry
                .series
                .points()
                .iter()
                .map(|p| (p.time_yr, p.radius_au));

            let anno = chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(draw_err)?;
            if i == 0 {
                anno.label(format!("{} cells", entry.resolution))
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
        }

        chart
            .draw_series(DashedLineSeries::new(
                [
                    (x_range.start, style.upper_guide_au),
                    (x_range.end, style.upper_guide_au),
                ],
                6,
                4,
                BLACK.stroke_width(1),
            ))
            .map_err(draw_err)?;
        chart
            .draw_series(LineSeries::new(
                [
                    (x_range.start, style.lower_guide_au),
                    (x_range.end, style.lower_guide_au),
                ],
                &BLACK,
            ))
            .map_err(draw_err)?;

        if i == 0 {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::LowerLeft)
                .draw()
                .map_err(draw_err)?;
        }
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Axis ranges shared by every panel, covering all series and both guides.
fn shared_ranges(panels: &[WidthPanel], style: &FigureStyle) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = style.lower_guide_au.min(style.upper_guide_au);
    let mut y_max = style.lower_guide_au.max(style.upper_guide_au);

    for panel in panels {
        for entry in &panel.series {
            for point in entry.series.points() {
                if point.time_yr.is_finite() {
                    x_min = x_min.min(point.time_yr);
                    x_max = x_max.max(point.time_yr);
                }
                if point.radius_au.is_finite() {
                    y_min = y_min.min(point.radius_au);
                    y_max = y_max.max(point.radius_au);
                }
            }
        }
    }

    if !x_min.is_finite() || !x_max.is_finite() {
        x_min = 0.0;
        x_max = 1.0;
    }

    (pad_range(x_min, x_max), pad_range(y_min, y_max))
}

fn pad_range(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    let pad = if span > 0.0 { 0.05 * span } else { 0.5 };
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{NormalizedSeries, ResolutionSeries};
    use crate::reader::{DiagnosticRecord, TimeSeries};

    fn panel(width: u32, samples: &[(f64, f64)]) -> WidthPanel {
        let records = samples
            .iter()
            .map(|&(t_yr, r_au)| DiagnosticRecord {
                time_s: crate::units::years_to_seconds(t_yr),
                radius_m: crate::units::au_to_meters(r_au),
                budget: 0.0,
            })
            .collect();
        WidthPanel {
            width,
            series: vec![ResolutionSeries {
                resolution: 300,
                series: NormalizedSeries::from_si(&TimeSeries::from_records(records)),
            }],
        }
    }

    #[test]
    fn test_no_panels_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render(&[], &dir.path().join("fig.png"), &FigureStyle::default()).unwrap_err();
        assert!(matches!(err, RenderError::NoPanels));
    }

    #[test]
    fn test_shared_ranges_cover_all_panels_and_guides() {
        let style = FigureStyle::default();
        let panels = vec![panel(1, &[(0.0, 5.0), (2.0, 15.0)]), panel(2, &[(1.0, 45.0)])];

        let (x_range, y_range) = shared_ranges(&panels, &style);

        assert!(x_range.start <= 0.0 && x_range.end >= 2.0);
        // Data reaches 45 AU and both guides (10, 30) lie inside.
        assert!(y_range.start <= 5.0 && y_range.end >= 45.0);
        assert!(y_range.start <= style.lower_guide_au);
        assert!(y_range.end >= style.upper_guide_au);
    }

    #[test]
    fn test_shared_ranges_ignore_non_finite_samples() {
        let style = FigureStyle::default();
        let mut p = panel(1, &[(1.0, 20.0)]);
        p.series[0] = ResolutionSeries {
            resolution: 300,
            series: NormalizedSeries::from_si(&TimeSeries::from_records(vec![
                DiagnosticRecord {
                    time_s: f64::NAN,
                    radius_m: f64::INFINITY,
                    budget: 0.0,
                },
            ])),
        };

        let (x_range, y_range) = shared_ranges(&[p], &style);
        assert!(x_range.start.is_finite() && x_range.end.is_finite());
        assert!(y_range.start.is_finite() && y_range.end.is_finite());
    }

    #[test]
    fn test_pad_range_degenerate_span() {
        let range = pad_range(3.0, 3.0);
        assert!(range.start < 3.0 && range.end > 3.0);
    }
}
