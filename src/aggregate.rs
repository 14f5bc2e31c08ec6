//! Assembly of convergence panels from a sweep directory.
//!
//! For each requested width, the aggregator reads the diagnostic series of
//! every requested resolution, converts it to figure units, and collects the
//! results into immutable [`WidthPanel`] values. Iteration order is
//! significant: it becomes the overlay and legend order in the rendered
//! figure and is never re-sorted.
//!
//! The default policy is fail-fast: the first unreadable diagnostic aborts
//! the whole aggregation so a partially populated figure can never be drawn
//! by accident. [`AggregateOptions::best_effort`] opts into skipping
//! unreadable files instead.

use std::path::Path;

use log::{debug, warn};

use crate::locator::SweepKey;
use crate::reader::{self, ReaderError, TimeSeries};
use crate::units;

/// One diagnostic sample in figure units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRecord {
    /// Simulation time in Julian years.
    pub time_yr: f64,
    /// Instability radius in astronomical units.
    pub radius_au: f64,
    /// Opaque passthrough of the on-disk third field.
    pub budget: f64,
}

/// A diagnostic time series in figure units, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSeries {
    points: Vec<NormalizedRecord>,
}

impl NormalizedSeries {
    /// Convert an SI series into figure units. The budget field passes
    /// through unchanged.
    pub fn from_si(series: &TimeSeries) -> Self {
        let points = series
            .records()
            .iter()
            .map(|record| NormalizedRecord {
                time_yr: units::seconds_to_years(record.time_s),
                radius_au: units::meters_to_au(record.radius_m),
                budget: record.budget,
            })
            .collect();
        Self { points }
    }

    /// The normalized samples, in file order.
    pub fn points(&self) -> &[NormalizedRecord] {
        &self.points
    }

    /// Number of samples in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One overlay entry of a panel: a resolution and its series.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionSeries {
    /// Grid resolution in cells.
    pub resolution: u32,
    /// The diagnostic series for that resolution, in figure units.
    pub series: NormalizedSeries,
}

/// One figure panel: a width with its resolution series in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthPanel {
    /// Integer-valued physical domain width identifier, in AU.
    pub width: u32,
    /// Overlay entries, in the order resolutions were requested.
    pub series: Vec<ResolutionSeries>,
}

/// Errors that can occur during aggregation
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// A diagnostic file could not be read
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// Every diagnostic of one panel was dropped in best-effort mode
    #[error("no readable diagnostic for width {width}")]
    EmptyPanel {
        /// The width whose panel ended up empty
        width: u32,
    },
}

/// Aggregation tuning. The default is strict: any read failure aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOptions {
    /// Skip unreadable diagnostics with a warning instead of failing the
    /// whole figure. A panel that loses all of its series still fails.
    pub best_effort: bool,
}

/// Assemble one panel per width, overlaying one series per resolution.
///
/// Fail-fast: the first read failure is returned and no panels are produced.
pub fn aggregate(
    dir: &Path,
    widths: &[u32],
    resolutions: &[u32],
) -> Result<Vec<WidthPanel>, AggregateError> {
    aggregate_with(dir, widths, resolutions, AggregateOptions::default())
}

/// [`aggregate`] with explicit [`AggregateOptions`].
pub fn aggregate_with(
    dir: &Path,
    widths: &[u32],
    resolutions: &[u32],
    options: AggregateOptions,
) -> Result<Vec<WidthPanel>, AggregateError> {
    let mut panels = Vec::with_capacity(widths.len());

    for &width in widths {
        let mut series = Vec::with_capacity(resolutions.len());

        for &resolution in resolutions {
            let key = SweepKey { width, resolution };
            let path = key.path(dir);
            debug!("reading {}", path.display());

            match reader::read(&path) {
                Ok(raw) => series.push(ResolutionSeries {
                    resolution,
                    series: NormalizedSeries::from_si(&raw),
                }),
                Err(err) if options.best_effort => {
                    warn!("skipping {}: {err}", path.display());
                }
                Err(err) => return Err(err.into()),
            }
        }

        if series.is_empty() {
            return Err(AggregateError::EmptyPanel { width });
        }

        panels.push(WidthPanel { width, series });
    }

    Ok(panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_diagnostic(dir: &Path, width: u32, resolution: u32, triples: &[(f64, f64, f64)]) {
        let key = SweepKey { width, resolution };
        let mut file = File::create(key.path(dir)).unwrap();
        for &(t, r, b) in triples {
            file.write_all(&t.to_ne_bytes()).unwrap();
            file.write_all(&r.to_ne_bytes()).unwrap();
            file.write_all(&b.to_ne_bytes()).unwrap();
        }
    }

    #[test]
    fn test_normalization_values() {
        let series = TimeSeries::from_records(vec![crate::reader::DiagnosticRecord {
            time_s: 3.15576e7,
            radius_m: 1.496e12,
            budget: 0.125,
        }]);
        let normalized = NormalizedSeries::from_si(&series);

        let point = normalized.points()[0];
        assert!((point.time_yr - 1.0).abs() < 1e-10);
        assert!((point.radius_au - 10.0).abs() < 1e-10);
        assert_eq!(point.budget, 0.125);
    }

    #[test]
    fn test_order_preserved_per_request() {
        let dir = tempfile::tempdir().unwrap();
        // Create files in an order unrelated to the request order.
        write_diagnostic(dir.path(), 2, 900, &[(1.0, 1.0, 0.0)]);
        write_diagnostic(dir.path(), 1, 900, &[(1.0, 1.0, 0.0)]);
        write_diagnostic(dir.path(), 2, 300, &[(1.0, 1.0, 0.0)]);
        write_diagnostic(dir.path(), 1, 300, &[(1.0, 1.0, 0.0)]);

        let panels = aggregate(dir.path(), &[1, 2], &[300, 900]).unwrap();

        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].width, 1);
        assert_eq!(panels[1].width, 2);
        for panel in &panels {
            let order: Vec<u32> = panel.series.iter().map(|s| s.resolution).collect();
            assert_eq!(order, vec![300, 900]);
        }
    }

    #[test]
    fn test_unsorted_request_order_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        write_diagnostic(dir.path(), 1, 300, &[(1.0, 1.0, 0.0)]);
        write_diagnostic(dir.path(), 1, 5400, &[(1.0, 1.0, 0.0)]);

        let panels = aggregate(dir.path(), &[1], &[5400, 300]).unwrap();
        let order: Vec<u32> = panels[0].series.iter().map(|s| s.resolution).collect();
        assert_eq!(order, vec![5400, 300]);
    }

    #[test]
    fn test_missing_file_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let err = aggregate(dir.path(), &[1], &[300]).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::Reader(ReaderError::NotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_file_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let key = SweepKey {
            width: 1,
            resolution: 300,
        };
        std::fs::write(key.path(dir.path()), [0u8; 25]).unwrap();

        let err = aggregate(dir.path(), &[1], &[300]).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::Reader(ReaderError::Malformed { .. })
        ));
    }

    #[test]
    fn test_best_effort_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_diagnostic(dir.path(), 1, 900, &[(1.0, 1.0, 0.0)]);

        let options = AggregateOptions { best_effort: true };
        let panels = aggregate_with(dir.path(), &[1], &[300, 900], options).unwrap();

        assert_eq!(panels[0].series.len(), 1);
        assert_eq!(panels[0].series[0].resolution, 900);
    }

    #[test]
    fn test_best_effort_rejects_fully_empty_panel() {
        let dir = tempfile::tempdir().unwrap();
        let options = AggregateOptions { best_effort: true };
        let err = aggregate_with(dir.path(), &[7], &[300], options).unwrap_err();
        assert!(matches!(err, AggregateError::EmptyPanel { width: 7 }));
    }
}
