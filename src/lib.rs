//! # convstudy - Convergence-Study Toolkit
//!
//! `convstudy` supports convergence studies of ionisation-instability
//! simulations: it synthesizes reproducible run-configuration commands,
//! ingests the binary instability-radius diagnostics the runs produce across
//! sweeps of physical domain width and grid resolution, normalizes units,
//! and renders a comparative multi-panel convergence figure.
//!
//! ## Diagnostic Format
//!
//! A diagnostic file is a flat, headerless sequence of host-order 64-bit
//! floats, grouped in triples and written in time order:
//!
//! | Field | Type | Unit | Description |
//! |--------|------|------|-------------|
//! | time | Float64 | s | Simulation time of the sample |
//! | radius | Float64 | m | Instability radius |
//! | budget | Float64 | - | Remaining ionisation budget (passthrough) |
//!
//! There is no terminator or length prefix; the record count is inferred
//! from the file size, which must be an exact multiple of 24 bytes. Files
//! follow the naming convention
//! `convergence_instability_w<width>_<resolution>_radius.dat` shared with
//! the run launcher.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use convstudy::aggregate;
//! use convstudy::render::{self, FigureStyle};
//!
//! // One panel per width, one overlaid series per resolution.
//! let panels = aggregate::aggregate(
//!     Path::new("runs"),
//!     &[1, 2, 3, 4, 5],
//!     &[300, 900, 2700, 5400],
//! )?;
//!
//! render::render(
//!     &panels,
//!     Path::new("fig_convergence_instability.png"),
//!     &FigureStyle::default(),
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Architecture
//!
//! Data flows strictly leaf-to-root; each module produces an immutable
//! value consumed by the next, so aggregation is unit-testable without any
//! rendering backend:
//!
//! - [`locator`]: diagnostic file naming for `(width, resolution)` pairs
//! - [`reader`]: memory-mapped binary decoding with stride validation
//! - [`units`]: SI ↔ figure-unit conversions
//! - [`aggregate`]: per-width panel assembly, order-preserving
//! - [`render`]: stacked multi-panel figure output
//! - [`check`]: sweep completeness reports
//! - [`configure`]: reproducible CMake run-configuration commands

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod check;
pub mod configure;
pub mod locator;
pub mod reader;
pub mod render;
pub mod units;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::aggregate::{
        aggregate, aggregate_with, AggregateError, AggregateOptions, NormalizedRecord,
        NormalizedSeries, ResolutionSeries, WidthPanel,
    };
    pub use crate::check::{check_sweep, CheckStatus, SweepCheck, SweepReport};
    pub use crate::configure::{OptionValue, RunOptions};
    pub use crate::locator::SweepKey;
    pub use crate::reader::{DiagnosticRecord, ReaderError, TimeSeries, RECORD_STRIDE};
    pub use crate::render::{render, FigureStyle, RenderError};
    pub use crate::units::{
        au_to_meters, meters_to_au, seconds_to_years, years_to_seconds, METERS_PER_AU,
        SECONDS_PER_YEAR,
    };
}
