//! Digital State-Change Events
//!
//! Change detection compares the current presence flags with the last ones
//! it saw and emits one [`StateChange`] per channel that flipped. Events are
//! small `Copy` values collected into a stack-allocated vector; at most one
//! per digital channel can come out of a single check.
//!
//! The manager logs every event at `info` level as it is produced. The
//! returned vector is for callers that want to react beyond logging, such as
//! flashing an indicator or pushing an immediate report.

use core::fmt;

use crate::hardware::DigitalChannel;
use crate::time::Timestamp;

/// Maximum events one change check can produce
pub const MAX_STATE_CHANGES: usize = DigitalChannel::ALL.len();

/// Events from one change check
pub type StateChanges = heapless::Vec<StateChange, MAX_STATE_CHANGES>;

/// A digital channel flipped between present and absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChange {
    /// Channel that flipped
    pub channel: DigitalChannel,
    /// New state
    pub present: bool,
    /// When the flip was detected
    pub timestamp: Timestamp,
}

impl StateChange {
    /// Human-readable state label
    pub const fn state_label(&self) -> &'static str {
        presence_label(self.present)
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.channel, self.state_label())
    }
}

/// Label used for presence flags in logs and console lines
pub const fn presence_label(present: bool) -> &'static str {
    if present { "PRESENT" } else { "ABSENT" }
}
