//! Acquisition & Change-Detection Manager
//!
//! ## Overview
//!
//! [`AcquisitionManager`] is driven by one cooperative loop calling
//! [`update`](AcquisitionManager::update) as often as it likes. There is no
//! scheduling thread and nothing blocks: two named [`Interval`]s are checked
//! against the injected clock on every call.
//!
//! ```text
//! update(force)
//!   ├── acquisition interval due (or force)?
//!   │     acquire_cycle()          read every channel, filter, convert
//!   │     detect_state_changes()   log presence flips
//!   └── fast-poll interval due?
//!         re-read digital inputs only
//!         differs from published sample? → patch raw + physical, detect again
//! ```
//!
//! The fast path exists so a presence change is published within the short
//! poll period instead of waiting up to a full acquisition interval.
//!
//! ## Acquisition Cycle
//!
//! 1. Count the read and stamp it with `clock.now()`
//! 2. Read both digital inputs through the debounced facade; active-low
//!    "pressed" becomes "present"
//! 3. Read the hardware-averaged pH counts and push them through the filter
//! 4. Read temperature and humidity; values inside their validity band are
//!    filtered, values outside (NaN included) are stored verbatim and leave
//!    the history untouched
//! 5. Advance the shared filter cursor
//! 6. Derive the physical sample
//!
//! A bad reading is never smoothed into looking valid and never dropped.
//! Consumers range-check with
//! [`PhysicalSample::check_ranges`](crate::sample::PhysicalSample::check_ranges).
//!
//! ## Ownership
//!
//! The manager owns the filter histories, the last-seen presence flags and
//! the change reference. None of them are exposed for mutation; callers get
//! copies of the published samples.

use crate::buffer::FilterBank;
use crate::config::AcquisitionConfig;
use crate::constants::buffers::FILTER_WINDOW_SIZE;
use crate::errors::SensorResult;
use crate::events::{StateChange, StateChanges};
use crate::hardware::{AnalogChannel, DigitalChannel, HardwareFacade};
use crate::reference::ChangeReference;
use crate::sample::{PhysicalSample, RawSample, SensorSelector};
use crate::time::{Clock, Interval, Timestamp};

/// Drives acquisition, filtering and change detection for one node
#[derive(Debug)]
pub struct AcquisitionManager<H, C, const N: usize = FILTER_WINDOW_SIZE> {
    hardware: H,
    clock: C,
    config: AcquisitionConfig,
    filters: FilterBank<N>,
    raw: RawSample,
    physical: PhysicalSample,
    last_presence: [bool; DigitalChannel::ALL.len()],
    acquisition: Interval,
    state_check: Interval,
    read_count: u32,
    reference: ChangeReference,
}

impl<H: HardwareFacade, C: Clock, const N: usize> AcquisitionManager<H, C, N> {
    /// Create a manager; no hardware is touched until the first cycle
    pub fn new(hardware: H, clock: C, config: AcquisitionConfig) -> Self {
        let raw = RawSample {
            temperature: config.temperature_seed,
            humidity: config.humidity_seed,
            ..RawSample::default()
        };

        Self {
            hardware,
            clock,
            filters: FilterBank::from_config(&config),
            physical: PhysicalSample::from_raw(&raw),
            raw,
            last_presence: [false; DigitalChannel::ALL.len()],
            acquisition: Interval::new(config.acquisition_interval_ms),
            state_check: Interval::new(config.fast_poll_interval_ms),
            read_count: 0,
            reference: ChangeReference::new(config.reference_window_ms),
            config,
        }
    }

    /// Run one cycle up front so the first published sample is real
    pub fn init(&mut self) {
        log_info!("initialising sensor manager");
        self.acquire_cycle();
        log_debug!("filter window: {} samples", N);
    }

    /// Read every channel once and publish a new physical sample
    pub fn acquire_cycle(&mut self) -> PhysicalSample {
        self.read_count = self.read_count.wrapping_add(1);
        let now = self.clock.now();
        self.raw.timestamp = now;

        for channel in DigitalChannel::ALL {
            let pressed = self
                .hardware
                .read_digital_debounced(channel, channel.active_level());
            self.raw.set_presence(channel, pressed);
        }

        let ph_counts = self
            .hardware
            .read_analog_averaged(AnalogChannel::Ph, self.config.ph_oversampling);
        let temperature = self.hardware.read_temperature();
        let humidity = self.hardware.read_humidity();

        self.raw.ph_raw = self.filters.insert_ph(ph_counts);

        self.raw.temperature = if self.config.temperature_band.contains(temperature) {
            self.filters.insert_temperature(temperature)
        } else {
            log_warn!("temperature {} outside valid band, stored unfiltered", temperature);
            temperature
        };

        self.raw.humidity = if self.config.humidity_band.contains(humidity) {
            self.filters.insert_humidity(humidity)
        } else {
            log_warn!("humidity {} outside valid band, stored unfiltered", humidity);
            humidity
        };

        self.filters.advance();
        self.acquisition.mark(now);

        self.physical = PhysicalSample::from_raw(&self.raw);
        log_debug!(
            "read #{}: pH {:.2} T {:.1} H {:.1}",
            self.read_count,
            self.physical.ph,
            self.physical.temperature,
            self.physical.humidity
        );

        self.physical
    }

    /// Compare raw presence with the last seen flags and emit the flips
    ///
    /// Restarts the fast-poll interval whether or not anything changed.
    pub fn detect_state_changes(&mut self) -> StateChanges {
        let now = self.clock.now();
        let mut changes = StateChanges::new();

        for channel in DigitalChannel::ALL {
            let present = self.raw.presence(channel);
            let last = &mut self.last_presence[channel.index()];
            if present != *last {
                *last = present;
                let change = StateChange { channel, present, timestamp: now };
                log_info!("state change: {}", change);
                // Capacity equals the channel count
                let _ = changes.push(change);
            }
        }

        self.state_check.mark(now);
        changes
    }

    /// Loop tick; returns whether the published sample changed
    pub fn update(&mut self, force_update: bool) -> bool {
        let mut data_changed = false;

        if force_update || self.acquisition.is_due(self.clock.now()) {
            self.acquire_cycle();
            self.detect_state_changes();
            data_changed = true;
        }

        if self.state_check.is_due(self.clock.now()) && self.poll_digital() {
            data_changed = true;
        }

        data_changed
    }

    /// Digital-only read between full cycles
    ///
    /// Does not restart the fast-poll interval by itself; only a detected
    /// change does, through [`detect_state_changes`](Self::detect_state_changes).
    fn poll_digital(&mut self) -> bool {
        let mut pressed = [false; DigitalChannel::ALL.len()];
        let mut differs = false;

        for channel in DigitalChannel::ALL {
            let state = self
                .hardware
                .read_digital_debounced(channel, channel.active_level());
            pressed[channel.index()] = state;
            differs |= state != self.physical.presence(channel);
        }

        if !differs {
            return false;
        }

        for channel in DigitalChannel::ALL {
            let state = pressed[channel.index()];
            self.raw.set_presence(channel, state);
            self.physical.set_presence(channel, state);
        }
        self.detect_state_changes();
        true
    }

    /// Whether the published sample moved away from the change baseline
    ///
    /// The baseline refreshes every reference window; the refreshing call
    /// always returns false.
    pub fn sensor_changed(&mut self, selector: SensorSelector, threshold: f32) -> bool {
        let now = self.clock.now();
        self.reference.check(&self.physical, selector, threshold, now)
    }

    /// [`sensor_changed`](Self::sensor_changed) with a numeric selector;
    /// unknown codes return false
    pub fn sensor_changed_code(&mut self, code: u8, threshold: f32) -> bool {
        let now = self.clock.now();
        self.reference.check_code(&self.physical, code, threshold, now)
    }

    /// Latest physical sample
    pub fn data(&self) -> &PhysicalSample {
        &self.physical
    }

    /// Latest raw sample
    pub fn raw_data(&self) -> &RawSample {
        &self.raw
    }

    /// Render the latest sample as compact JSON into `buf`
    pub fn data_json(&self, buf: &mut [u8]) -> SensorResult<usize> {
        self.physical.write_json(buf)
    }

    /// Number of acquisition cycles run so far
    pub fn read_count(&self) -> u32 {
        self.read_count
    }

    /// Last presence flags seen by change detection
    pub fn last_presence(&self, channel: DigitalChannel) -> bool {
        self.last_presence[channel.index()]
    }

    /// Current time on the manager's clock
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Configuration in force
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Filter histories, read-only
    pub fn filters(&self) -> &FilterBank<N> {
        &self.filters
    }

    /// Change-detection baseline, read-only
    pub fn reference(&self) -> &ChangeReference {
        &self.reference
    }

    /// The hardware facade
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// The hardware facade, mutably (board maintenance, test scripting)
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// The clock
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
