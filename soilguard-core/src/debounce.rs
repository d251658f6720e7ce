//! Software debounce for digital inputs
//!
//! Mechanical contacts bounce for a few milliseconds when they open or close.
//! [`Debouncer`] only accepts a new level after it has been seen continuously
//! for the configured stability window:
//!
//! ```text
//! raw     ‾‾‾‾|_|‾‾‾‾‾‾‾‾|_|‾|__________________
//! stable  ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|__________
//!                                ←window→
//! ```
//!
//! A glitch shorter than the window never reaches the stable state. The
//! debouncer is sampled, not interrupt driven: call [`Debouncer::update`]
//! each time the pin is read, with the current time.

use crate::constants::time::DEBOUNCE_WINDOW_MS;
use crate::time::{elapsed, Timestamp};

/// Electrical level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Pin pulled to ground
    Low,
    /// Pin at supply voltage
    High,
}

impl Level {
    /// The opposite level
    pub const fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// A pin that can report its instantaneous level
pub trait RawDigitalInput {
    /// Current electrical level, bounces included
    fn read_level(&mut self) -> Level;
}

/// Stability-window debouncer for one input
#[derive(Debug, Clone)]
pub struct Debouncer {
    active_level: Level,
    window_ms: u32,
    stable: Level,
    candidate: Level,
    candidate_since: Timestamp,
}

impl Debouncer {
    /// Debouncer starting released, pressed meaning `active_level`
    pub fn new(active_level: Level, window_ms: u32) -> Self {
        let released = active_level.inverted();
        Self {
            active_level,
            window_ms,
            stable: released,
            candidate: released,
            candidate_since: 0,
        }
    }

    /// Active-low input with the default window
    pub fn active_low() -> Self {
        Self::new(Level::Low, DEBOUNCE_WINDOW_MS)
    }

    /// Feed one raw sample; returns whether the input counts as pressed
    pub fn update(&mut self, raw: Level, now: Timestamp) -> bool {
        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since = now;
        }

        if self.candidate != self.stable && elapsed(now, self.candidate_since) >= self.window_ms {
            self.stable = self.candidate;
        }

        self.is_pressed()
    }

    /// Whether `level` counts as pressed for this input
    pub fn is_active(&self, level: Level) -> bool {
        level == self.active_level
    }

    /// Whether the accepted level is the active one
    pub fn is_pressed(&self) -> bool {
        self.is_active(self.stable)
    }

    /// Last accepted level
    pub fn stable_level(&self) -> Level {
        self.stable
    }
}

/// A raw pin paired with its debouncer
#[derive(Debug, Clone)]
pub struct DebouncedPin<P> {
    pin: P,
    debouncer: Debouncer,
}

impl<P: RawDigitalInput> DebouncedPin<P> {
    /// Wrap a pin
    pub fn new(pin: P, debouncer: Debouncer) -> Self {
        Self { pin, debouncer }
    }

    /// Sample the pin and return the debounced pressed state
    pub fn read(&mut self, now: Timestamp) -> bool {
        let level = self.pin.read_level();
        self.debouncer.update(level, now)
    }

    /// The wrapped pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}
