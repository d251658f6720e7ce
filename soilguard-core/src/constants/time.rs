//! Time-Related Constants
//!
//! Intervals evaluated by [`AcquisitionManager::update`] against the
//! injected clock.
//!
//! [`AcquisitionManager::update`]: crate::manager::AcquisitionManager::update

/// Default period between full acquisition cycles (milliseconds).
///
/// The DHT22 cannot be read faster than every ~2 s; reads in between
/// return the sensor's cached value, which is harmless for the filter.
pub const ACQUISITION_INTERVAL_MS: u32 = 1000;

/// Period between digital-only polls (milliseconds).
///
/// Must be shorter than [`ACQUISITION_INTERVAL_MS`] so presence changes are
/// not held back until the next full cycle.
pub const FAST_POLL_INTERVAL_MS: u32 = 50;

/// Lifetime of the baseline used by change detection (milliseconds).
pub const REFERENCE_WINDOW_MS: u32 = 5000;

/// Time a digital level must stay stable before it is accepted (milliseconds).
pub const DEBOUNCE_WINDOW_MS: u32 = 50;
