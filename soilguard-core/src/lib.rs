//! Acquisition core for SoilGuard field nodes
//!
//! Turns raw readings from a fixed set of soil and air channels into
//! calibrated, smoothed values and detects the changes worth reporting.
//! Designed for microcontrollers driven from a single cooperative loop.
//!
//! Key constraints:
//! - No heap allocation anywhere in the crate
//! - No blocking, no internal scheduling thread
//! - Time comes from an injected [`Clock`], so every timer is testable
//!
//! Channels handled by a node:
//! - pH probe on an analog input (0-4095 ADC counts, mapped to 0-14 pH)
//! - Air temperature and relative humidity from a combined sensor
//! - Phosphorus and potassium presence on two active-low digital inputs
//!
//! ```no_run
//! use soilguard_core::{AcquisitionConfig, AcquisitionManager, ManualClock};
//! # use soilguard_core::hardware::{AnalogChannel, DigitalChannel, HardwareFacade};
//! # use soilguard_core::debounce::Level;
//! # struct Board;
//! # impl HardwareFacade for Board {
//! #     fn read_digital_debounced(&mut self, _: DigitalChannel, _: Level) -> bool { false }
//! #     fn read_analog_averaged(&mut self, _: AnalogChannel, _: u8) -> u16 { 2048 }
//! #     fn read_temperature(&mut self) -> f32 { 24.0 }
//! #     fn read_humidity(&mut self) -> f32 { 55.0 }
//! # }
//!
//! let clock = ManualClock::new(0);
//! let mut manager: AcquisitionManager<_, _> =
//!     AcquisitionManager::new(Board, &clock, AcquisitionConfig::default());
//! manager.init();
//!
//! loop {
//!     if manager.update(false) {
//!         let sample = manager.data();
//!         // hand the sample to the reporting layer
//!         # let _ = sample;
//!     }
//!     # break;
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Logging compiles away entirely when the `log` facade is not enabled.
#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod buffer;
pub mod config;
pub mod constants;
pub mod debounce;
pub mod errors;
pub mod events;
pub mod hardware;
pub mod manager;
pub mod reference;
pub mod sample;
pub mod text;
pub mod time;

// Public API
pub use buffer::FilterBank;
pub use config::{AcquisitionConfig, ValidityBand};
pub use errors::{SensorError, SensorResult};
pub use events::{StateChange, StateChanges};
pub use hardware::{AnalogChannel, DigitalChannel, HardwareFacade};
pub use manager::AcquisitionManager;
pub use reference::ChangeReference;
pub use sample::{PhysicalSample, RawSample, SampleJson, SensorSelector};
pub use time::{Clock, Interval, ManualClock, Timestamp};

#[cfg(feature = "std")]
pub use time::SystemClock;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
