//! Time management for the acquisition loop
//!
//! Provides the clock abstraction the manager is driven by:
//! - [`Clock`]: milliseconds since boot, wrapping like a hardware tick counter
//! - [`ManualClock`]: set by hand, for deterministic tests and simulations
//! - [`SystemClock`]: host time since construction (requires `std`)
//!
//! and [`Interval`], a named period checked against a clock on every tick
//! instead of being driven by callbacks.

use core::cell::Cell;

/// Milliseconds since device boot
///
/// 32 bits wrap after ~49.7 days; all interval arithmetic goes through
/// [`elapsed`] so the wrap is harmless.
pub type Timestamp = u32;

/// Monotonic millisecond source
pub trait Clock {
    /// Current time in milliseconds
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Milliseconds from `since` to `now`, across counter wrap
pub fn elapsed(now: Timestamp, since: Timestamp) -> u32 {
    now.wrapping_sub(since)
}

/// Clock that only moves when told to
///
/// Uses interior mutability so a test can keep advancing it while the
/// manager holds a shared reference.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    /// Create a clock reading `start`
    pub const fn new(start: Timestamp) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Jump to an absolute time
    pub fn set(&self, timestamp: Timestamp) {
        self.now.set(timestamp);
    }

    /// Move forward by `ms`, wrapping like a tick counter
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

/// Host clock counting from its construction (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Truncation is the intended wrap
        self.start.elapsed().as_millis() as Timestamp
    }
}

/// A named period evaluated against a clock
///
/// `is_due` is true once at least `period_ms` have elapsed since the last
/// `mark`. Cancellation is implicit: stop asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u32,
    last_ms: Timestamp,
}

impl Interval {
    /// Create an interval last marked at time zero
    pub const fn new(period_ms: u32) -> Self {
        Self { period_ms, last_ms: 0 }
    }

    /// Configured period in milliseconds
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Time of the last mark
    pub const fn last(&self) -> Timestamp {
        self.last_ms
    }

    /// Milliseconds since the last mark
    pub fn elapsed(&self, now: Timestamp) -> u32 {
        elapsed(now, self.last_ms)
    }

    /// Whether a full period has passed since the last mark
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.elapsed(now) >= self.period_ms
    }

    /// Restart the period at `now`
    pub fn mark(&mut self, now: Timestamp) {
        self.last_ms = now;
    }
}
