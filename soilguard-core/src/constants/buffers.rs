//! Buffer Sizes
//!
//! Fixed capacities for filter histories and text output. All of them are
//! compile-time so no allocation is needed.

/// Number of samples in each moving-average window.
///
/// All continuous channels share this window and a single write cursor.
pub const FILTER_WINDOW_SIZE: usize = 10;

/// Capacity that always fits a compact JSON rendering of a sample.
///
/// Worst case is three `f32::MIN` values rendered with one decimal
/// (42 bytes each), two `false` flags and a ten-digit timestamp: 220 bytes.
pub const SAMPLE_JSON_CAPACITY: usize = 256;

/// Capacity for one console telemetry line.
pub const CONSOLE_LINE_CAPACITY: usize = 192;
