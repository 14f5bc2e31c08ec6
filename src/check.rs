//! Sweep completeness checking.
//!
//! Before a convergence figure is attempted, a study directory can be
//! checked for every diagnostic the width × resolution cross product calls
//! for. Unlike aggregation, checking never aborts early: every file is
//! probed and the report lists each one, so a single pass shows everything
//! that is still missing or corrupt.

use std::fmt;
use std::path::Path;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::locator::SweepKey;
use crate::reader::{self, ReaderError};

/// Outcome of probing one diagnostic file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Readable and well-formed, with its record count
    Ok {
        /// Number of records decoded
        records: usize,
    },
    /// The file is missing or cannot be opened
    Missing,
    /// The byte length is not a whole number of records
    Malformed,
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok { .. })
    }
}

/// Per-file result within a sweep report.
#[derive(Debug, Clone)]
pub struct SweepCheck {
    /// The run this file belongs to.
    pub key: SweepKey,
    /// The probed file name.
    pub file_name: String,
    /// What the probe found.
    pub status: CheckStatus,
}

/// Completeness report over a full width × resolution cross product.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    checks: Vec<SweepCheck>,
}

impl SweepReport {
    /// The per-file results, in width-major request order.
    pub fn checks(&self) -> &[SweepCheck] {
        &self.checks
    }

    /// Number of well-formed diagnostics.
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Number of missing or malformed diagnostics.
    pub fn failed(&self) -> usize {
        self.checks.len() - self.passed()
    }

    /// Whether every diagnostic of the sweep is present and well-formed.
    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }

    /// Format the report with colors (requires the console feature).
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Sweep Check").bold().cyan()));
            output.push_str(&format!("{}\n", style("===========").cyan()));

            for check in &self.checks {
                match &check.status {
                    CheckStatus::Ok { records } => output.push_str(&format!(
                        "[✓] {} ({} records)\n",
                        style(check.file_name.as_str()).green(),
                        records
                    )),
                    CheckStatus::Missing => output.push_str(&format!(
                        "[✗] {} - missing\n",
                        style(check.file_name.as_str()).red()
                    )),
                    CheckStatus::Malformed => output.push_str(&format!(
                        "[✗] {} - malformed\n",
                        style(check.file_name.as_str()).red()
                    )),
                }
            }

            output.push_str(&format!(
                "\n{}: {} passed, {} failed\n",
                style("Summary").bold(),
                style(self.passed()).green(),
                style(self.failed()).red()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sweep Check")?;
        writeln!(f, "===========")?;

        for check in &self.checks {
            match &check.status {
                CheckStatus::Ok { records } => {
                    writeln!(f, "[✓] {} ({} records)", check.file_name, records)?
                }
                CheckStatus::Missing => writeln!(f, "[✗] {} - missing", check.file_name)?,
                CheckStatus::Malformed => writeln!(f, "[✗] {} - malformed", check.file_name)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Summary: {} passed, {} failed", self.passed(), self.failed())
    }
}

/// Probe every diagnostic of the sweep and report per-file status.
pub fn check_sweep(dir: &Path, widths: &[u32], resolutions: &[u32]) -> SweepReport {
    let mut checks = Vec::with_capacity(widths.len() * resolutions.len());

    for &width in widths {
        for &resolution in resolutions {
            let key = SweepKey { width, resolution };
            let status = match reader::read(&key.path(dir)) {
                Ok(series) => CheckStatus::Ok {
                    records: series.len(),
                },
                Err(ReaderError::Malformed { .. }) => CheckStatus::Malformed,
                Err(_) => CheckStatus::Missing,
            };
            checks.push(SweepCheck {
                key,
                file_name: key.file_name(),
                status,
            });
        }
    }

    SweepReport { checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_report_covers_cross_product_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let report = check_sweep(dir.path(), &[1, 2], &[300, 900]);

        assert_eq!(report.checks().len(), 4);
        let keys: Vec<(u32, u32)> = report
            .checks()
            .iter()
            .map(|c| (c.key.width, c.key.resolution))
            .collect();
        assert_eq!(keys, vec![(1, 300), (1, 900), (2, 300), (2, 900)]);
    }

    #[test]
    fn test_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let ok = SweepKey {
            width: 1,
            resolution: 300,
        };
        let bad = SweepKey {
            width: 1,
            resolution: 900,
        };
        fs::write(ok.path(dir.path()), 1.0f64.to_ne_bytes().repeat(3)).unwrap();
        fs::write(bad.path(dir.path()), [0u8; 10]).unwrap();

        let report = check_sweep(dir.path(), &[1], &[300, 900, 2700]);

        assert_eq!(report.checks()[0].status, CheckStatus::Ok { records: 1 });
        assert_eq!(report.checks()[1].status, CheckStatus::Malformed);
        assert_eq!(report.checks()[2].status, CheckStatus::Missing);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_display() {
        let dir = tempfile::tempdir().unwrap();
        let report = check_sweep(dir.path(), &[1], &[300]);

        let output = format!("{}", report);
        assert!(output.contains("✗"));
        assert!(output.contains("missing"));
        assert!(output.contains("0 passed, 1 failed"));
    }
}
