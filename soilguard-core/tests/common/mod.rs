//! Shared harness for acquisition tests
//!
//! `ScriptedBoard` stands in for real hardware: tests set the electrical
//! level of each digital pin and the values the analog and climate sensors
//! return. Digital reads go through a real [`Debouncer`] clocked by the same
//! [`ManualClock`] the manager uses, so bounce scenarios behave as on a board.

#![allow(dead_code)]

use soilguard_core::debounce::{Debouncer, Level};
use soilguard_core::hardware::{AnalogChannel, DigitalChannel, HardwareFacade};
use soilguard_core::time::{Clock, ManualClock};

/// Debounce window used by the scripted board (ms)
pub const BOARD_DEBOUNCE_MS: u32 = 30;

pub struct ScriptedBoard<'a> {
    clock: &'a ManualClock,
    levels: [Level; 2],
    debouncers: [Debouncer; 2],
    pub adc: u16,
    pub temperature: f32,
    pub humidity: f32,
    pub analog_reads: usize,
}

impl<'a> ScriptedBoard<'a> {
    /// Board with both buttons released and mid-range readings
    pub fn new(clock: &'a ManualClock) -> Self {
        let debouncer = |channel: DigitalChannel| Debouncer::new(channel.active_level(), BOARD_DEBOUNCE_MS);
        Self {
            clock,
            levels: [Level::High; 2],
            debouncers: [
                debouncer(DigitalChannel::Phosphorus),
                debouncer(DigitalChannel::Potassium),
            ],
            adc: 2048,
            temperature: 24.0,
            humidity: 55.0,
            analog_reads: 0,
        }
    }

    /// Drive the pin of `channel` to `level`
    pub fn set_level(&mut self, channel: DigitalChannel, level: Level) {
        self.levels[channel.index()] = level;
    }

    /// Hold the button of `channel` down (active-low)
    pub fn press(&mut self, channel: DigitalChannel) {
        self.set_level(channel, Level::Low);
    }

    /// Let go of the button of `channel`
    pub fn release(&mut self, channel: DigitalChannel) {
        self.set_level(channel, Level::High);
    }
}

impl HardwareFacade for ScriptedBoard<'_> {
    fn read_digital_debounced(&mut self, channel: DigitalChannel, active_level: Level) -> bool {
        assert_eq!(active_level, channel.active_level());
        let idx = channel.index();
        self.debouncers[idx].update(self.levels[idx], self.clock.now())
    }

    fn read_analog_averaged(&mut self, _channel: AnalogChannel, _samples: u8) -> u16 {
        self.analog_reads += 1;
        self.adc
    }

    fn read_temperature(&mut self) -> f32 {
        self.temperature
    }

    fn read_humidity(&mut self) -> f32 {
        self.humidity
    }
}

/// Tick the manager every `step` ms for `duration` ms, returning how many
/// ticks reported changed data
pub fn run_for<H, C, const N: usize>(
    manager: &mut soilguard_core::AcquisitionManager<H, C, N>,
    clock: &ManualClock,
    duration: u32,
    step: u32,
) -> usize
where
    H: HardwareFacade,
    C: Clock,
{
    let mut changed = 0;
    let mut spent = 0;
    while spent < duration {
        clock.advance(step);
        spent += step;
        if manager.update(false) {
            changed += 1;
        }
    }
    changed
}
