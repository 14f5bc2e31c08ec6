//! Diagnostic file naming.
//!
//! Simulation runs write their instability-radius diagnostic under a fixed
//! naming convention shared with the run-configuration tooling:
//! `convergence_instability_w<width>_<resolution>_radius.dat`. The locator
//! only derives paths; a missing file surfaces later as a read failure, not
//! here.

use std::path::{Path, PathBuf};

/// Identifies one simulation run's diagnostic output within a sweep.
///
/// Widths and resolutions are drawn from small fixed sets in a given study
/// (e.g. widths 1-5 AU, resolutions 300-5400 cells), but the locator treats
/// them as arbitrary values so other sweeps can reuse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SweepKey {
    /// Integer-valued physical domain width identifier, in AU.
    pub width: u32,
    /// Grid resolution in cells.
    pub resolution: u32,
}

impl SweepKey {
    /// The diagnostic file name for this run.
    pub fn file_name(&self) -> String {
        format!(
            "convergence_instability_w{}_{}_radius.dat",
            self.width, self.resolution
        )
    }

    /// The diagnostic file path inside a sweep directory.
    pub fn path(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_template() {
        let key = SweepKey {
            width: 3,
            resolution: 2700,
        };
        assert_eq!(key.file_name(), "convergence_instability_w3_2700_radius.dat");
    }

    #[test]
    fn test_path_joins_directory() {
        let key = SweepKey {
            width: 1,
            resolution: 300,
        };
        let path = key.path(Path::new("/data/sweep"));
        assert_eq!(
            path,
            Path::new("/data/sweep/convergence_instability_w1_300_radius.dat")
        );
    }

    #[test]
    fn test_arbitrary_values_are_not_special_cased() {
        let key = SweepKey {
            width: 42,
            resolution: 17,
        };
        assert_eq!(key.file_name(), "convergence_instability_w42_17_radius.dat");
    }
}
