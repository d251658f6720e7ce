//! Raw and Physical Sample Models
//!
//! ## Overview
//!
//! One acquisition cycle produces one [`RawSample`]: the filtered ADC count
//! of the pH probe, the (filtered or verbatim) temperature and humidity, and
//! the two normalised presence states, stamped with the acquisition time.
//!
//! [`PhysicalSample::from_raw`] turns it into physical units. The conversion
//! is a pure, total function with no hidden state:
//!
//! ```text
//! ph          = raw_ph * 14 / 4095      (0 → 0.0, 2048 → ~7.002, 4095 → 14.0)
//! temperature = temperature             (already °C from the driver)
//! humidity    = humidity                (already %RH from the driver)
//! presence    = state != 0
//! timestamp   = timestamp
//! ```
//!
//! Both models are plain `Copy` values. Each stage hands a copy to the next
//! one; nothing is shared mutably.
//!
//! ## Compact JSON
//!
//! A physical sample renders to a single-line JSON object with one decimal
//! for every float:
//!
//! ```text
//! {"ph":6.5,"temperature":24.3,"humidity":55.0,"phosphorus":true,"potassium":false,"timestamp":12345}
//! ```
//!
//! Non-finite values are written as Rust formats them (`NaN`, `inf`,
//! `-inf`), not in the lowercase `nan` C's printf produces. That is not
//! strict JSON, but a reading the sensor could not deliver must stay
//! visible to whoever consumes the line.

use core::fmt::{self, Write};

use crate::config::{AcquisitionConfig, ValidityBand};
use crate::constants::buffers::SAMPLE_JSON_CAPACITY;
use crate::constants::sensors::{ADC_FULL_SCALE, HUMIDITY_SEED_PCT, PH_SCALE_MAX, TEMPERATURE_SEED_C};
use crate::errors::{SensorError, SensorResult};
use crate::hardware::DigitalChannel;
use crate::text::BoundedWriter;
use crate::time::Timestamp;

/// Compact JSON of one sample, sized for any value
pub type SampleJson = heapless::String<SAMPLE_JSON_CAPACITY>;

/// Channels carrying real-valued readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContinuousChannel {
    /// Soil pH from the analog probe
    Ph,
    /// Air temperature
    Temperature,
    /// Relative air humidity
    Humidity,
}

impl ContinuousChannel {
    /// Field name used in serialized output
    pub const fn name(&self) -> &'static str {
        match self {
            ContinuousChannel::Ph => "ph",
            ContinuousChannel::Temperature => "temperature",
            ContinuousChannel::Humidity => "humidity",
        }
    }
}

impl fmt::Display for ContinuousChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Channel compared by change detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SensorSelector {
    /// pH, compared against a threshold
    Ph = 0,
    /// Humidity, compared against a threshold
    Humidity = 1,
    /// Phosphorus presence, any flip counts
    Phosphorus = 2,
    /// Potassium presence, any flip counts
    Potassium = 3,
}

impl SensorSelector {
    /// Map the numeric selector used by the reporting layer
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SensorSelector::Ph),
            1 => Some(SensorSelector::Humidity),
            2 => Some(SensorSelector::Phosphorus),
            3 => Some(SensorSelector::Potassium),
            _ => None,
        }
    }

    /// Numeric selector code
    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for SensorSelector {
    type Error = SensorError;

    fn try_from(code: u8) -> SensorResult<Self> {
        Self::from_code(code).ok_or(SensorError::UnknownSelector(code))
    }
}

/// Readings of one acquisition cycle, before unit conversion
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSample {
    /// Filtered pH probe value in ADC counts (0-4095)
    pub ph_raw: u16,
    /// Temperature in °C, filtered when inside its validity band
    pub temperature: f32,
    /// Relative humidity in %, filtered when inside its validity band
    pub humidity: f32,
    /// Phosphorus state (0 = absent, 1 = present)
    pub phosphorus_state: u8,
    /// Potassium state (0 = absent, 1 = present)
    pub potassium_state: u8,
    /// Acquisition time
    pub timestamp: Timestamp,
}

impl Default for RawSample {
    fn default() -> Self {
        Self {
            ph_raw: 0,
            temperature: TEMPERATURE_SEED_C,
            humidity: HUMIDITY_SEED_PCT,
            phosphorus_state: 0,
            potassium_state: 0,
            timestamp: 0,
        }
    }
}

impl RawSample {
    /// Store a normalised presence state
    pub fn set_presence(&mut self, channel: DigitalChannel, present: bool) {
        let state = u8::from(present);
        match channel {
            DigitalChannel::Phosphorus => self.phosphorus_state = state,
            DigitalChannel::Potassium => self.potassium_state = state,
        }
    }

    /// Presence as stored in this sample
    pub fn presence(&self, channel: DigitalChannel) -> bool {
        match channel {
            DigitalChannel::Phosphorus => self.phosphorus_state != 0,
            DigitalChannel::Potassium => self.potassium_state != 0,
        }
    }
}

/// Calibrated values in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalSample {
    /// Soil pH (0-14)
    pub ph: f32,
    /// Air temperature in °C
    pub temperature: f32,
    /// Relative humidity in % (0-100 when valid)
    pub humidity: f32,
    /// Phosphorus detected
    pub phosphorus: bool,
    /// Potassium detected
    pub potassium: bool,
    /// Acquisition time of the raw sample
    pub timestamp: Timestamp,
}

impl Default for PhysicalSample {
    fn default() -> Self {
        Self {
            ph: 0.0,
            temperature: TEMPERATURE_SEED_C,
            humidity: HUMIDITY_SEED_PCT,
            phosphorus: false,
            potassium: false,
            timestamp: 0,
        }
    }
}

impl From<RawSample> for PhysicalSample {
    fn from(raw: RawSample) -> Self {
        Self::from_raw(&raw)
    }
}

impl PhysicalSample {
    /// Convert a raw sample to physical units
    pub fn from_raw(raw: &RawSample) -> Self {
        Self {
            ph: ph_from_counts(raw.ph_raw),
            temperature: raw.temperature,
            humidity: raw.humidity,
            phosphorus: raw.phosphorus_state != 0,
            potassium: raw.potassium_state != 0,
            timestamp: raw.timestamp,
        }
    }

    /// Presence flag of a digital channel
    pub fn presence(&self, channel: DigitalChannel) -> bool {
        match channel {
            DigitalChannel::Phosphorus => self.phosphorus,
            DigitalChannel::Potassium => self.potassium,
        }
    }

    /// Overwrite the presence flag of a digital channel
    pub fn set_presence(&mut self, channel: DigitalChannel, present: bool) {
        match channel {
            DigitalChannel::Phosphorus => self.phosphorus = present,
            DigitalChannel::Potassium => self.potassium = present,
        }
    }

    /// Value of a continuous channel
    pub fn value(&self, channel: ContinuousChannel) -> f32 {
        match channel {
            ContinuousChannel::Ph => self.ph,
            ContinuousChannel::Temperature => self.temperature,
            ContinuousChannel::Humidity => self.humidity,
        }
    }

    /// Check stored temperature and humidity against the configured bands
    ///
    /// Out-of-range values are kept by acquisition, so this is how a consumer
    /// finds out a channel is suspect. Reports the first failing channel.
    pub fn check_ranges(&self, config: &AcquisitionConfig) -> SensorResult<()> {
        let bands = [
            (ContinuousChannel::Temperature, &config.temperature_band),
            (ContinuousChannel::Humidity, &config.humidity_band),
        ];
        for (channel, band) in bands {
            check_band(channel, self.value(channel), band)?;
        }
        Ok(())
    }

    /// Render compact JSON into `buf`, returning the number of bytes written
    ///
    /// Fails with [`SensorError::BufferTooSmall`] when the text does not fit;
    /// the buffer is never written past its end.
    pub fn write_json(&self, buf: &mut [u8]) -> SensorResult<usize> {
        let capacity = buf.len();
        let mut writer = BoundedWriter::new(buf);
        self.fmt_json(&mut writer)
            .map_err(|_| SensorError::BufferTooSmall { capacity })?;
        Ok(writer.len())
    }

    /// Render compact JSON into a fixed-capacity string
    pub fn to_json<const CAP: usize>(&self) -> SensorResult<heapless::String<CAP>> {
        let mut out = heapless::String::new();
        self.fmt_json(&mut out)
            .map_err(|_| SensorError::BufferTooSmall { capacity: CAP })?;
        Ok(out)
    }

    /// Render compact JSON into a string that fits every possible sample
    pub fn json(&self) -> SensorResult<SampleJson> {
        self.to_json()
    }

    fn fmt_json<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            "{{\"ph\":{:.1},\"temperature\":{:.1},\"humidity\":{:.1},\"phosphorus\":{},\"potassium\":{},\"timestamp\":{}}}",
            self.ph,
            self.temperature,
            self.humidity,
            self.phosphorus,
            self.potassium,
            self.timestamp,
        )
    }
}

/// Map ADC counts onto the pH scale
pub fn ph_from_counts(counts: u16) -> f32 {
    f32::from(counts) * PH_SCALE_MAX / f32::from(ADC_FULL_SCALE)
}

fn check_band(channel: ContinuousChannel, value: f32, band: &ValidityBand) -> SensorResult<()> {
    if band.contains(value) {
        Ok(())
    } else {
        Err(SensorError::OutOfRange {
            channel,
            value,
            min: band.min,
            max: band.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ph_raw: u16) -> RawSample {
        RawSample {
            ph_raw,
            temperature: 22.0,
            humidity: 40.0,
            phosphorus_state: 1,
            potassium_state: 0,
            timestamp: 777,
        }
    }

    #[test]
    fn analog_scaling_endpoints() {
        assert_eq!(PhysicalSample::from_raw(&raw(4095)).ph, 14.0);
        assert_eq!(PhysicalSample::from_raw(&raw(0)).ph, 0.0);

        let mid = PhysicalSample::from_raw(&raw(2048)).ph;
        assert!((mid - 28672.0 / 4095.0).abs() < 1e-6, "got {mid}");
        assert!((mid - 7.003).abs() < 5e-3, "got {mid}");
    }

    #[test]
    fn conversion_copies_through() {
        let sample = PhysicalSample::from_raw(&raw(100));
        assert_eq!(sample.temperature, 22.0);
        assert_eq!(sample.humidity, 40.0);
        assert!(sample.phosphorus);
        assert!(!sample.potassium);
        assert_eq!(sample.timestamp, 777);
    }

    #[test]
    fn nonzero_state_means_present() {
        let mut r = raw(0);
        r.potassium_state = 7;
        assert!(PhysicalSample::from(r).potassium);
    }

    #[test]
    fn compact_json_exact() {
        let sample = PhysicalSample {
            ph: 6.5,
            temperature: 24.3,
            humidity: 55.0,
            phosphorus: true,
            potassium: false,
            timestamp: 12345,
        };

        let json = sample.to_json::<128>().unwrap();
        assert_eq!(
            json.as_str(),
            r#"{"ph":6.5,"temperature":24.3,"humidity":55.0,"phosphorus":true,"potassium":false,"timestamp":12345}"#
        );

        let mut buf = [0u8; 128];
        let n = sample.write_json(&mut buf).unwrap();
        assert_eq!(&buf[..n], json.as_bytes());
    }

    #[test]
    fn widest_sample_fits_default_capacity() {
        let sample = PhysicalSample {
            ph: f32::MIN,
            temperature: f32::MIN,
            humidity: f32::MIN,
            phosphorus: false,
            potassium: false,
            timestamp: u32::MAX,
        };

        let json = sample.json().unwrap();
        assert_eq!(json.len(), 220);
        assert!(json.len() <= SAMPLE_JSON_CAPACITY);
    }

    #[test]
    fn non_finite_written_verbatim() {
        let sample = PhysicalSample {
            temperature: f32::INFINITY,
            humidity: f32::NAN,
            ..PhysicalSample::default()
        };
        let json = sample.json().unwrap();
        assert!(json.contains("\"temperature\":inf,"));
        assert!(json.contains("\"humidity\":NaN,"));
    }

    #[test]
    fn value_by_channel() {
        let sample = PhysicalSample { ph: 6.5, temperature: 24.0, humidity: 60.0, ..PhysicalSample::default() };
        assert_eq!(sample.value(ContinuousChannel::Ph), 6.5);
        assert_eq!(sample.value(ContinuousChannel::Temperature), 24.0);
        assert_eq!(sample.value(ContinuousChannel::Humidity), 60.0);
    }

    #[test]
    fn json_reports_small_buffer() {
        let sample = PhysicalSample::default();
        let mut buf = [0xAAu8; 16];
        assert_eq!(
            sample.write_json(&mut buf[..10]),
            Err(SensorError::BufferTooSmall { capacity: 10 })
        );
        // Bytes past the offered slice are untouched
        assert!(buf[10..].iter().all(|&b| b == 0xAA));

        assert!(sample.to_json::<8>().is_err());
    }

    #[test]
    fn range_check_flags_temperature() {
        let config = AcquisitionConfig::default();
        let hot = PhysicalSample { temperature: 150.0, ..PhysicalSample::default() };
        assert!(matches!(
            hot.check_ranges(&config),
            Err(SensorError::OutOfRange { channel: ContinuousChannel::Temperature, .. })
        ));

        let dry = PhysicalSample { humidity: f32::NAN, ..PhysicalSample::default() };
        assert!(matches!(
            dry.check_ranges(&config),
            Err(SensorError::OutOfRange { channel: ContinuousChannel::Humidity, .. })
        ));

        assert!(PhysicalSample::default().check_ranges(&config).is_ok());
    }

    #[test]
    fn selector_codes() {
        assert_eq!(SensorSelector::from_code(0), Some(SensorSelector::Ph));
        assert_eq!(SensorSelector::from_code(3), Some(SensorSelector::Potassium));
        assert_eq!(SensorSelector::from_code(4), None);
        assert_eq!(SensorSelector::try_from(9), Err(SensorError::UnknownSelector(9)));
        assert_eq!(SensorSelector::Humidity.code(), 1);
    }
}
