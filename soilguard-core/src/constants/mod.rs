//! Constants for SoilGuard Core
//!
//! Centralised numeric values used by the acquisition pipeline. Every
//! runtime-tunable value here is only the default; [`AcquisitionConfig`]
//! carries the value actually in force.
//!
//! ## Organization
//!
//! - **Sensors**: ADC scaling, validity bands and filter seeds
//! - **Time**: acquisition, fast-poll, reference and debounce intervals
//! - **Buffers**: filter window and text buffer sizes
//!
//! [`AcquisitionConfig`]: crate::config::AcquisitionConfig

/// Sensor scaling, validity bands and filter seeds.
pub mod sensors;

/// Intervals driving the acquisition loop.
pub mod time;

/// Filter window and serialization buffer sizes.
pub mod buffers;

pub use sensors::{
    ADC_FULL_SCALE, PH_SCALE_MAX,
    TEMPERATURE_VALID_MIN_C, TEMPERATURE_VALID_MAX_C,
    HUMIDITY_VALID_MIN_PCT, HUMIDITY_VALID_MAX_PCT,
};

pub use time::{
    ACQUISITION_INTERVAL_MS, FAST_POLL_INTERVAL_MS,
    REFERENCE_WINDOW_MS, DEBOUNCE_WINDOW_MS,
};

pub use buffers::{FILTER_WINDOW_SIZE, SAMPLE_JSON_CAPACITY};
