//! Error Types for the Acquisition Core
//!
//! ## Design Philosophy
//!
//! Acquisition itself never fails. A bad reading is kept (see
//! [`AcquisitionManager::acquire_cycle`]) and it is up to consumers to decide
//! what to do with it. Errors therefore only come from the helpers consumers
//! call afterwards:
//!
//! - `OutOfRange`: returned by [`PhysicalSample::check_ranges`] when a stored
//!   value lies outside its validity band
//! - `BufferTooSmall`: a caller-provided buffer cannot hold the rendered text;
//!   nothing is written past its end
//! - `UnknownSelector`: a numeric channel selector that maps to no channel
//!
//! Like the rest of the crate the errors are small `Copy` values with no heap
//! data, so they can be returned from the hot path and stored freely.
//!
//! ```rust
//! use soilguard_core::{AcquisitionConfig, PhysicalSample, SensorError};
//!
//! let sample = PhysicalSample { temperature: 150.0, ..PhysicalSample::default() };
//! match sample.check_ranges(&AcquisitionConfig::default()) {
//!     Ok(()) => {}
//!     Err(SensorError::OutOfRange { channel, value, .. }) => {
//!         // flag the channel as suspect in the report
//!         # let _ = (channel, value);
//!     }
//!     Err(_) => {}
//! }
//! ```
//!
//! [`AcquisitionManager::acquire_cycle`]: crate::manager::AcquisitionManager::acquire_cycle
//! [`PhysicalSample::check_ranges`]: crate::sample::PhysicalSample::check_ranges

use thiserror_no_std::Error;

use crate::sample::ContinuousChannel;

/// Result type for core helpers
pub type SensorResult<T> = Result<T, SensorError>;

/// Errors reported by the acquisition core
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// Stored value lies outside the channel's validity band
    #[error("{channel} reading {value} outside valid band [{min}, {max}]")]
    OutOfRange {
        /// Channel holding the suspect value
        channel: ContinuousChannel,
        /// The stored value (may be NaN)
        value: f32,
        /// Lower band limit
        min: f32,
        /// Upper band limit
        max: f32,
    },

    /// Output does not fit the provided buffer
    #[error("output does not fit in a {capacity} byte buffer")]
    BufferTooSmall {
        /// Capacity of the buffer that was offered
        capacity: usize,
    },

    /// Numeric selector does not name a channel
    #[error("unknown sensor selector {0}")]
    UnknownSelector(u8),
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRange { channel, value, min, max } =>
                defmt::write!(fmt, "{} value {} outside [{}, {}]", channel.name(), value, min, max),
            Self::BufferTooSmall { capacity } =>
                defmt::write!(fmt, "Buffer of {} bytes too small", capacity),
            Self::UnknownSelector(code) =>
                defmt::write!(fmt, "Unknown selector {}", code),
        }
    }
}
