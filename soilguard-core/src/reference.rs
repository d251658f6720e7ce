//! Change Reference
//!
//! Holds the baseline sample that [`ChangeReference::check`] compares the
//! current sample against. The baseline lives for a coarse window
//! (5 s by default), independent of the acquisition interval:
//!
//! ```text
//! t=0        baseline = zeroed sample
//! t=5001     refresh: baseline = current, return false
//! t=5002..   compare current against baseline
//! t=10002    refresh again, return false
//! ```
//!
//! The call that refreshes the baseline always answers "unchanged"; the next
//! comparison within the window is the first one that can report a change.
//! Continuous channels report a change when the absolute difference exceeds
//! the threshold; digital channels on any flip.
//!
//! The refresh happens before the selector is looked at, so a call with an
//! unknown selector code still restarts an expired window.

use crate::constants::time::REFERENCE_WINDOW_MS;
use crate::sample::{PhysicalSample, SensorSelector};
use crate::time::{elapsed, Timestamp};

/// Baseline before the first refresh: every reading zero, nothing present
const ZEROED: PhysicalSample = PhysicalSample {
    ph: 0.0,
    temperature: 0.0,
    humidity: 0.0,
    phosphorus: false,
    potassium: false,
    timestamp: 0,
};

/// Baseline sample plus the time it was taken
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeReference {
    baseline: PhysicalSample,
    refreshed_at: Timestamp,
    window_ms: u32,
}

impl Default for ChangeReference {
    fn default() -> Self {
        Self::new(REFERENCE_WINDOW_MS)
    }
}

impl ChangeReference {
    /// Reference starting from a zeroed sample at time zero
    pub fn new(window_ms: u32) -> Self {
        Self {
            baseline: ZEROED,
            refreshed_at: 0,
            window_ms,
        }
    }

    /// Current baseline
    pub fn baseline(&self) -> &PhysicalSample {
        &self.baseline
    }

    /// Time of the last refresh
    pub fn refreshed_at(&self) -> Timestamp {
        self.refreshed_at
    }

    /// Baseline lifetime in milliseconds
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Whether `current` differs from the baseline on `selector`
    ///
    /// Refreshes the baseline instead of comparing once the window has
    /// passed (strictly more than `window_ms` since the last refresh).
    pub fn check(
        &mut self,
        current: &PhysicalSample,
        selector: SensorSelector,
        threshold: f32,
        now: Timestamp,
    ) -> bool {
        if self.refresh_if_due(current, now) {
            return false;
        }
        self.differs(current, selector, threshold)
    }

    /// Like [`check`](Self::check) with a numeric selector; unknown codes
    /// report no change but still refresh an expired baseline
    pub fn check_code(
        &mut self,
        current: &PhysicalSample,
        code: u8,
        threshold: f32,
        now: Timestamp,
    ) -> bool {
        if self.refresh_if_due(current, now) {
            return false;
        }
        match SensorSelector::from_code(code) {
            Some(selector) => self.differs(current, selector, threshold),
            None => false,
        }
    }

    fn refresh_if_due(&mut self, current: &PhysicalSample, now: Timestamp) -> bool {
        if elapsed(now, self.refreshed_at) <= self.window_ms {
            return false;
        }
        self.baseline = *current;
        self.refreshed_at = now;
        log_debug!("change reference refreshed at {} ms", now);
        true
    }

    fn differs(&self, current: &PhysicalSample, selector: SensorSelector, threshold: f32) -> bool {
        let baseline = &self.baseline;
        match selector {
            SensorSelector::Ph => libm::fabsf(current.ph - baseline.ph) > threshold,
            SensorSelector::Humidity => libm::fabsf(current.humidity - baseline.humidity) > threshold,
            SensorSelector::Phosphorus => current.phosphorus != baseline.phosphorus,
            SensorSelector::Potassium => current.potassium != baseline.potassium,
        }
    }
}
