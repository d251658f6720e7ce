//! Fixed-Size Moving-Average Histories
//!
//! ## Overview
//!
//! Every continuous channel (pH counts, temperature, humidity) is smoothed by
//! a simple moving average over the last `N` samples. The histories are plain
//! arrays sized at compile time, so filtering never allocates.
//!
//! ## Synchronized Cursor
//!
//! The channels do not each keep a write position. A [`FilterBank`] owns all
//! histories plus one shared cursor, and the cursor moves once per
//! acquisition cycle, after every channel has been written:
//!
//! ```text
//! FilterBank<5>, cursor = 2
//!             ┌─────┬─────┬─────┬─────┬─────┐
//! ph          │ 812 │ 815 │ new │ 800 │ 801 │
//! temperature │24.1 │24.2 │ new │24.0 │24.0 │
//! humidity    │55.0 │54.8 │ new │55.3 │55.1 │
//!             └─────┴─────┴─────┴─────┴─────┘
//!                           ↑
//!                    written this cycle, then cursor → 3
//! ```
//!
//! Column `i` therefore always holds readings from the same cycle. The price
//! is that a channel skipping a cycle (an out-of-range reading bypasses the
//! filter) keeps the stale value in that column until the cursor comes round
//! again.
//!
//! ## Startup Bias
//!
//! Histories start filled with a seed value, never empty, and never grow. The
//! mean is always taken over all `N` slots, so for the first `N` cycles the
//! output is pulled towards the seed; after `N` identical inputs it equals
//! that input.
//!
//! ## Usage Example
//!
//! ```rust
//! use soilguard_core::buffer::FilterBank;
//!
//! let mut bank: FilterBank<4> = FilterBank::new(0, 20.0, 50.0);
//!
//! for _ in 0..4 {
//!     let temperature = bank.insert_temperature(24.0);
//!     let humidity = bank.insert_humidity(60.0);
//!     bank.advance();
//!     # let _ = (temperature, humidity);
//! }
//!
//! assert_eq!(bank.temperature_history(), &[24.0; 4]);
//! ```

use crate::config::AcquisitionConfig;

/// A sample type the moving average can be computed over
pub trait FilterValue: Copy {
    /// Arithmetic mean of a full window
    fn mean<const N: usize>(window: &[Self; N]) -> Self;
}

impl FilterValue for u16 {
    /// Integer mean, truncating
    fn mean<const N: usize>(window: &[Self; N]) -> Self {
        let sum: u32 = window.iter().map(|&v| u32::from(v)).sum();
        // Mean of u16 values always fits a u16
        (sum / N as u32) as u16
    }
}

impl FilterValue for f32 {
    /// NaN or infinite members propagate into the mean
    fn mean<const N: usize>(window: &[Self; N]) -> Self {
        let sum: f32 = window.iter().sum();
        sum / N as f32
    }
}

/// History of one channel
///
/// Has no cursor of its own; the owning [`FilterBank`] says where to write.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterHistory<T, const N: usize> {
    slots: [T; N],
}

impl<T: FilterValue, const N: usize> FilterHistory<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "filter window must hold at least one sample");

    /// History with every slot set to `seed`
    pub const fn seeded(seed: T) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self { slots: [seed; N] }
    }

    /// Write `value` at `cursor` and return the mean of all slots
    ///
    /// `cursor` is reduced modulo `N`.
    pub fn insert(&mut self, cursor: usize, value: T) -> T {
        self.slots[cursor % N] = value;
        self.mean()
    }

    /// Mean of all slots
    pub fn mean(&self) -> T {
        T::mean(&self.slots)
    }

    /// All slots in storage order
    pub fn slots(&self) -> &[T; N] {
        &self.slots
    }
}

/// Moving-average histories for every continuous channel, one shared cursor
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank<const N: usize> {
    ph: FilterHistory<u16, N>,
    temperature: FilterHistory<f32, N>,
    humidity: FilterHistory<f32, N>,
    cursor: usize,
}

impl<const N: usize> FilterBank<N> {
    /// Bank with each history filled with its seed
    pub const fn new(ph_seed: u16, temperature_seed: f32, humidity_seed: f32) -> Self {
        Self {
            ph: FilterHistory::seeded(ph_seed),
            temperature: FilterHistory::seeded(temperature_seed),
            humidity: FilterHistory::seeded(humidity_seed),
            cursor: 0,
        }
    }

    /// Bank seeded from the configuration
    pub fn from_config(config: &AcquisitionConfig) -> Self {
        Self::new(config.ph_seed, config.temperature_seed, config.humidity_seed)
    }

    /// Window size
    pub const fn window(&self) -> usize {
        N
    }

    /// Slot written by the current cycle
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Filter a pH reading (ADC counts)
    pub fn insert_ph(&mut self, counts: u16) -> u16 {
        self.ph.insert(self.cursor, counts)
    }

    /// Filter a temperature reading
    pub fn insert_temperature(&mut self, celsius: f32) -> f32 {
        self.temperature.insert(self.cursor, celsius)
    }

    /// Filter a humidity reading
    pub fn insert_humidity(&mut self, percent: f32) -> f32 {
        self.humidity.insert(self.cursor, percent)
    }

    /// Close the cycle: move the shared cursor to the next slot
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % N;
    }

    /// pH history in storage order
    pub fn ph_history(&self) -> &[u16; N] {
        self.ph.slots()
    }

    /// Temperature history in storage order
    pub fn temperature_history(&self) -> &[f32; N] {
        self.temperature.slots()
    }

    /// Humidity history in storage order
    pub fn humidity_history(&self) -> &[f32; N] {
        self.humidity.slots()
    }
}
