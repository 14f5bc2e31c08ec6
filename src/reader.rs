//! Binary instability-radius diagnostic reading.
//!
//! A simulation run appends one fixed-width record to its diagnostic file
//! every time the instability radius moves appreciably: three host-order
//! 64-bit floats `(time_s, radius_m, budget)`, no header, no terminator.
//! The record count is inferred from the file size, which therefore must be
//! an exact multiple of the 24-byte stride.
//!
//! Files are memory-mapped rather than read eagerly, so long-running sweeps
//! with large diagnostics decode without full materialization. The mapping
//! lives only for the duration of [`read`] and is released on every exit
//! path, including malformed-data failures.

use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use byteorder::{NativeEndian, ReadBytesExt};
use memmap2::Mmap;

/// Size in bytes of one on-disk diagnostic record (three `f64` values).
pub const RECORD_STRIDE: usize = 3 * std::mem::size_of::<f64>();

/// One diagnostic sample as stored by the simulation, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosticRecord {
    /// Simulation time in seconds.
    pub time_s: f64,
    /// Instability radius in meters.
    pub radius_m: f64,
    /// Remaining ionisation budget. Present in every record but never
    /// interpreted by this pipeline; carried through as-is.
    pub budget: f64,
}

/// An ordered diagnostic time series.
///
/// Records keep file order; the producer writes them in time order and the
/// reader trusts that (no re-sorting, no deduplication).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    records: Vec<DiagnosticRecord>,
}

impl TimeSeries {
    /// Wrap an already-decoded record sequence.
    pub fn from_records(records: Vec<DiagnosticRecord>) -> Self {
        Self { records }
    }

    /// Number of records in the series.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in file order.
    pub fn records(&self) -> &[DiagnosticRecord] {
        &self.records
    }
}

/// Errors that can occur while reading a diagnostic file
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// The diagnostic file does not exist or cannot be opened
    #[error("diagnostic file not found: {path}: {source}")]
    NotFound {
        /// The path that failed to open
        path: PathBuf,
        /// The underlying open failure
        source: std::io::Error,
    },

    /// The file's byte length is not a whole number of records
    #[error("malformed diagnostic file: {path}: {len_bytes} bytes is not a multiple of the 24-byte record stride")]
    Malformed {
        /// The offending file
        path: PathBuf,
        /// Its actual byte length
        len_bytes: u64,
    },

    /// I/O error while mapping or decoding the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a diagnostic file into a [`TimeSeries`].
///
/// Values are not sanity-checked: a negative radius or non-monotonic time
/// is passed through exactly as stored.
pub fn read(path: &Path) -> Result<TimeSeries, ReaderError> {
    let file = File::open(path).map_err(|source| ReaderError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    // A zero-length file maps to an empty series; mmap rejects empty ranges.
    if file.metadata()?.len() == 0 {
        return Ok(TimeSeries::default());
    }

    // SAFETY: the mapping is read-only and dropped before this function
    // returns; the file is not mutated concurrently by this process.
    let mmap = unsafe { Mmap::map(&file)? };
    decode(&mmap, path)
}

/// Decode a flat byte buffer of native-endian `f64` triples.
fn decode(bytes: &[u8], path: &Path) -> Result<TimeSeries, ReaderError> {
    if bytes.len() % RECORD_STRIDE != 0 {
        return Err(ReaderError::Malformed {
            path: path.to_path_buf(),
            len_bytes: bytes.len() as u64,
        });
    }

    let count = bytes.len() / RECORD_STRIDE;
    let mut records = Vec::with_capacity(count);
    let mut cursor = Cursor::new(bytes);

    for _ in 0..count {
        let time_s = cursor.read_f64::<NativeEndian>()?;
        let radius_m = cursor.read_f64::<NativeEndian>()?;
        let budget = cursor.read_f64::<NativeEndian>()?;
        records.push(DiagnosticRecord {
            time_s,
            radius_m,
            budget,
        });
    }

    Ok(TimeSeries { records })
}
