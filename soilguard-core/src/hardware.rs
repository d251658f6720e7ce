//! Hardware Access Facade
//!
//! The acquisition manager never touches pins or sensor drivers directly.
//! Board support code implements [`HardwareFacade`] and the manager pulls
//! readings through it:
//!
//! ```text
//! read_digital_debounced(channel, active_level) -> pressed?
//! read_analog_averaged(channel, samples)        -> ADC counts (0-4095)
//! read_temperature()                            -> °C or NaN
//! read_humidity()                               -> %RH or NaN
//! ```
//!
//! Time comes separately through [`Clock`](crate::time::Clock), which lets
//! tests script readings and time independently.
//!
//! ## Implementation Requirements
//!
//! - Calls are synchronous and bounded in latency; the manager does not
//!   retry, time out or cache
//! - The analog read performs its own oversampling, independent of the
//!   moving-average filter applied afterwards
//! - Temperature/humidity reads return NaN when the sensor cannot deliver;
//!   they must not block waiting for it
//! - Debouncing of digital inputs is the facade's job;
//!   [`Debouncer`](crate::debounce::Debouncer) implements the usual policy
//!
//! ## Example Implementation
//!
//! ```rust
//! use soilguard_core::debounce::Level;
//! use soilguard_core::hardware::{AnalogChannel, DigitalChannel, HardwareFacade};
//!
//! struct BenchBoard {
//!     buttons: [bool; 2],
//!     adc: u16,
//! }
//!
//! impl HardwareFacade for BenchBoard {
//!     fn read_digital_debounced(&mut self, channel: DigitalChannel, _active: Level) -> bool {
//!         self.buttons[channel.index()]
//!     }
//!
//!     fn read_analog_averaged(&mut self, _channel: AnalogChannel, _samples: u8) -> u16 {
//!         self.adc
//!     }
//!
//!     fn read_temperature(&mut self) -> f32 {
//!         21.5
//!     }
//!
//!     fn read_humidity(&mut self) -> f32 {
//!         f32::NAN // sensor not fitted
//!     }
//! }
//! ```

use core::fmt;

use crate::debounce::Level;

/// Boolean presence inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DigitalChannel {
    /// Phosphorus presence input
    Phosphorus,
    /// Potassium presence input
    Potassium,
}

impl DigitalChannel {
    /// Every digital channel, in reporting order
    pub const ALL: [DigitalChannel; 2] = [DigitalChannel::Phosphorus, DigitalChannel::Potassium];

    /// Field name used in serialized output
    pub const fn name(&self) -> &'static str {
        match self {
            DigitalChannel::Phosphorus => "phosphorus",
            DigitalChannel::Potassium => "potassium",
        }
    }

    /// Position in [`DigitalChannel::ALL`]
    pub const fn index(&self) -> usize {
        match self {
            DigitalChannel::Phosphorus => 0,
            DigitalChannel::Potassium => 1,
        }
    }

    /// Electrical level meaning "pressed"
    ///
    /// Both inputs use pull-ups, so a press pulls the pin low.
    pub const fn active_level(&self) -> Level {
        Level::Low
    }
}

impl fmt::Display for DigitalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Analog inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    /// pH probe front-end
    Ph,
}

/// Board-level access to every sensor channel
pub trait HardwareFacade {
    /// Debounced state of a digital input; true when it sits at `active_level`
    fn read_digital_debounced(&mut self, channel: DigitalChannel, active_level: Level) -> bool;

    /// Mean of `samples` consecutive ADC conversions (0-4095)
    fn read_analog_averaged(&mut self, channel: AnalogChannel, samples: u8) -> u16;

    /// Calibrated air temperature in °C, NaN on read failure
    fn read_temperature(&mut self) -> f32;

    /// Relative humidity in %, NaN on read failure
    fn read_humidity(&mut self) -> f32;
}

impl<H: HardwareFacade + ?Sized> HardwareFacade for &mut H {
    fn read_digital_debounced(&mut self, channel: DigitalChannel, active_level: Level) -> bool {
        (**self).read_digital_debounced(channel, active_level)
    }

    fn read_analog_averaged(&mut self, channel: AnalogChannel, samples: u8) -> u16 {
        (**self).read_analog_averaged(channel, samples)
    }

    fn read_temperature(&mut self) -> f32 {
        (**self).read_temperature()
    }

    fn read_humidity(&mut self) -> f32 {
        (**self).read_humidity()
    }
}
