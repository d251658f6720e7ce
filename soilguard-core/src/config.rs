//! Acquisition configuration
//!
//! Runtime knobs for the acquisition loop. Defaults come from
//! [`crate::constants`]; presets cover the common deployments.
//!
//! ```rust
//! use soilguard_core::AcquisitionConfig;
//!
//! // Battery node: read the slow channels every 10 s
//! let config = AcquisitionConfig::low_power();
//! assert_eq!(config.acquisition_interval_ms, 10_000);
//!
//! // Custom interval on top of the defaults
//! let config = AcquisitionConfig::default().with_acquisition_interval(2_000);
//! assert_eq!(config.fast_poll_interval_ms, 50);
//! ```

use crate::constants::{
    sensors::{
        HUMIDITY_SEED_PCT, HUMIDITY_VALID_MAX_PCT, HUMIDITY_VALID_MIN_PCT, PH_FILTER_SEED,
        PH_OVERSAMPLING, TEMPERATURE_SEED_C, TEMPERATURE_VALID_MAX_C, TEMPERATURE_VALID_MIN_C,
    },
    time::{ACQUISITION_INTERVAL_MS, FAST_POLL_INTERVAL_MS, REFERENCE_WINDOW_MS},
};

/// Range a continuous reading must fall in to be smoothed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidityBand {
    /// Lower limit
    pub min: f32,
    /// Upper limit
    pub max: f32,
    /// Whether the limits themselves are accepted
    pub inclusive: bool,
}

impl ValidityBand {
    /// Band excluding its limits
    pub const fn open(min: f32, max: f32) -> Self {
        Self { min, max, inclusive: false }
    }

    /// Band including its limits
    pub const fn closed(min: f32, max: f32) -> Self {
        Self { min, max, inclusive: true }
    }

    /// Whether `value` lies in the band; NaN never does
    pub fn contains(&self, value: f32) -> bool {
        if self.inclusive {
            value >= self.min && value <= self.max
        } else {
            value > self.min && value < self.max
        }
    }
}

/// Runtime configuration of the acquisition manager
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcquisitionConfig {
    /// Period between full acquisition cycles (ms)
    pub acquisition_interval_ms: u32,

    /// Period between digital-only polls (ms), shorter than the above
    pub fast_poll_interval_ms: u32,

    /// Lifetime of the change-detection baseline (ms)
    pub reference_window_ms: u32,

    /// Samples the hardware averages per pH read
    pub ph_oversampling: u8,

    /// Temperatures inside this band are smoothed, others stored verbatim
    pub temperature_band: ValidityBand,

    /// Humidities inside this band are smoothed, others stored verbatim
    pub humidity_band: ValidityBand,

    /// Initial content of the pH filter history (ADC counts)
    pub ph_seed: u16,

    /// Initial content of the temperature filter history (°C)
    pub temperature_seed: f32,

    /// Initial content of the humidity filter history (%RH)
    pub humidity_seed: f32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            acquisition_interval_ms: ACQUISITION_INTERVAL_MS,
            fast_poll_interval_ms: FAST_POLL_INTERVAL_MS,
            reference_window_ms: REFERENCE_WINDOW_MS,
            ph_oversampling: PH_OVERSAMPLING,
            temperature_band: ValidityBand::open(TEMPERATURE_VALID_MIN_C, TEMPERATURE_VALID_MAX_C),
            humidity_band: ValidityBand::closed(HUMIDITY_VALID_MIN_PCT, HUMIDITY_VALID_MAX_PCT),
            ph_seed: PH_FILTER_SEED,
            temperature_seed: TEMPERATURE_SEED_C,
            humidity_seed: HUMIDITY_SEED_PCT,
        }
    }
}

impl AcquisitionConfig {
    /// Bench or demo node: full cycle twice a second
    pub fn responsive() -> Self {
        Self {
            acquisition_interval_ms: 500,
            fast_poll_interval_ms: 20,
            ..Self::default()
        }
    }

    /// Battery node: slow channels every 10 s, digital inputs every 200 ms
    pub fn low_power() -> Self {
        Self {
            acquisition_interval_ms: 10_000,
            fast_poll_interval_ms: 200,
            ph_oversampling: 8,
            ..Self::default()
        }
    }

    /// Set the full-cycle period
    pub fn with_acquisition_interval(mut self, ms: u32) -> Self {
        self.acquisition_interval_ms = ms;
        self
    }

    /// Set the digital-only poll period
    pub fn with_fast_poll_interval(mut self, ms: u32) -> Self {
        self.fast_poll_interval_ms = ms;
        self
    }

    /// Set the change-detection baseline lifetime
    pub fn with_reference_window(mut self, ms: u32) -> Self {
        self.reference_window_ms = ms;
        self
    }

    /// Set hardware oversampling for the pH probe (at least one sample)
    pub fn with_ph_oversampling(mut self, samples: u8) -> Self {
        self.ph_oversampling = samples.max(1);
        self
    }

    /// Set the filter seeds
    pub fn with_seeds(mut self, ph: u16, temperature: f32, humidity: f32) -> Self {
        self.ph_seed = ph;
        self.temperature_seed = temperature;
        self.humidity_seed = humidity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_band_is_open() {
        let band = AcquisitionConfig::default().temperature_band;
        assert!(band.contains(-49.9));
        assert!(band.contains(99.9));
        assert!(!band.contains(-50.0));
        assert!(!band.contains(100.0));
        assert!(!band.contains(f32::NAN));
    }

    #[test]
    fn humidity_band_is_closed() {
        let band = AcquisitionConfig::default().humidity_band;
        assert!(band.contains(0.0));
        assert!(band.contains(100.0));
        assert!(!band.contains(100.1));
        assert!(!band.contains(-0.1));
    }

    #[test]
    fn presets_keep_fast_poll_shorter() {
        for config in [
            AcquisitionConfig::default(),
            AcquisitionConfig::responsive(),
            AcquisitionConfig::low_power(),
        ] {
            assert!(config.fast_poll_interval_ms < config.acquisition_interval_ms);
        }
    }

    #[test]
    fn builders_chain() {
        let config = AcquisitionConfig::default()
            .with_acquisition_interval(3000)
            .with_fast_poll_interval(25)
            .with_reference_window(1000)
            .with_ph_oversampling(0)
            .with_seeds(2048, 20.0, 60.0);

        assert_eq!(config.acquisition_interval_ms, 3000);
        assert_eq!(config.fast_poll_interval_ms, 25);
        assert_eq!(config.reference_window_ms, 1000);
        assert_eq!(config.ph_oversampling, 1);
        assert_eq!(config.ph_seed, 2048);
        assert_eq!(config.humidity_seed, 60.0);
    }
}
