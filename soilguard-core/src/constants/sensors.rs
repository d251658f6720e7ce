//! Sensor Scaling and Validity Limits
//!
//! Values for the channels wired to a SoilGuard node: a pH probe on the
//! 12-bit ADC, a DHT22-class temperature/humidity sensor and two push-button
//! style nutrient presence inputs.

// ===== ANALOG (pH) CHANNEL =====

/// Largest value the 12-bit ADC can report.
pub const ADC_FULL_SCALE: u16 = 4095;

/// pH value mapped to ADC full scale.
///
/// The probe front-end is linear over 0-14 pH, so conversion is
/// `raw * PH_SCALE_MAX / ADC_FULL_SCALE`.
pub const PH_SCALE_MAX: f32 = 14.0;

/// Samples averaged by the hardware layer for each pH read.
///
/// This oversampling happens before the moving-average filter and is
/// independent of it.
pub const PH_OVERSAMPLING: u8 = 3;

/// Seed for the pH filter history (ADC counts).
pub const PH_FILTER_SEED: u16 = 0;

// ===== TEMPERATURE / HUMIDITY CHANNEL =====

/// Lower bound (exclusive) of an accepted temperature reading (°C).
///
/// Readings at or below this bypass the filter and are stored verbatim.
pub const TEMPERATURE_VALID_MIN_C: f32 = -50.0;

/// Upper bound (exclusive) of an accepted temperature reading (°C).
pub const TEMPERATURE_VALID_MAX_C: f32 = 100.0;

/// Lower bound (inclusive) of an accepted humidity reading (%RH).
pub const HUMIDITY_VALID_MIN_PCT: f32 = 0.0;

/// Upper bound (inclusive) of an accepted humidity reading (%RH).
pub const HUMIDITY_VALID_MAX_PCT: f32 = 100.0;

/// Seed for the temperature filter history and the initial sample (°C).
pub const TEMPERATURE_SEED_C: f32 = 25.0;

/// Seed for the humidity filter history and the initial sample (%RH).
pub const HUMIDITY_SEED_PCT: f32 = 50.0;

// ===== IRRIGATION =====

/// Soil moisture (%) below which irrigation is considered.
///
/// Only reported alongside sensor data; the irrigation controller lives
/// outside this crate.
pub const MOISTURE_THRESHOLD_LOW: f32 = 30.0;
