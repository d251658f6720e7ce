//! External Metrics
//!
//! Values the acquisition core does not measure itself but every telemetry
//! snapshot carries: irrigation state, system health and network link.
//! Each comes from a provider trait the firmware implements on top of its
//! own monitors. Providers are pulled once, synchronously, when a snapshot is
//! prepared; nothing here caches.
//!
//! The plain metric structs implement their own provider trait, so a fixed
//! value can stand in for a live source.

use std::fmt;
use std::net::Ipv4Addr;

use soilguard_core::constants::sensors::MOISTURE_THRESHOLD_LOW;

/// Irrigation controller state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrigationMetrics {
    /// Pump currently running
    pub active: bool,
    /// Seconds the pump has run in the current activation
    pub uptime_s: u32,
    /// Time of the last activation (ms since boot)
    pub last_activation: u32,
    /// Activations today
    pub activations: u32,
    /// Soil moisture threshold that triggers irrigation (%)
    pub threshold: f32,
}

impl Default for IrrigationMetrics {
    fn default() -> Self {
        Self {
            active: false,
            uptime_s: 0,
            last_activation: 0,
            activations: 0,
            threshold: MOISTURE_THRESHOLD_LOW,
        }
    }
}

/// Memory and uptime figures from the system monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemMetrics {
    /// Free heap in bytes
    pub free_heap: u32,
    /// Lowest free heap seen since boot
    pub min_free_heap: u32,
    /// Heap fragmentation (%)
    pub fragmentation_pct: u8,
    /// CPU load estimate (%)
    pub cpu_load_pct: u8,
    /// Seconds since boot
    pub uptime_s: u32,
}

/// Wireless link state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkMetrics {
    /// Received signal strength (dBm)
    pub rssi_dbm: i32,
    /// Station address
    pub ip: Ipv4Addr,
}

impl Default for NetworkMetrics {
    fn default() -> Self {
        Self { rssi_dbm: 0, ip: Ipv4Addr::UNSPECIFIED }
    }
}

impl NetworkMetrics {
    /// Coarse link quality
    pub fn signal_quality(&self) -> SignalQuality {
        SignalQuality::from_rssi(self.rssi_dbm)
    }
}

/// Link quality bucket derived from RSSI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignalQuality {
    /// Below -80 dBm
    Poor,
    /// -80 to -71 dBm
    Fair,
    /// -70 to -61 dBm
    Good,
    /// -60 dBm and above
    Excellent,
}

impl SignalQuality {
    /// Classify a signal strength
    pub const fn from_rssi(rssi_dbm: i32) -> Self {
        if rssi_dbm < -80 {
            SignalQuality::Poor
        } else if rssi_dbm < -70 {
            SignalQuality::Fair
        } else if rssi_dbm < -60 {
            SignalQuality::Good
        } else {
            SignalQuality::Excellent
        }
    }

    /// Label used on the console
    pub const fn label(&self) -> &'static str {
        match self {
            SignalQuality::Poor => "Poor",
            SignalQuality::Fair => "Fair",
            SignalQuality::Good => "Good",
            SignalQuality::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for SignalQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Provides irrigation state on demand
pub trait IrrigationMetricsSource {
    /// Current irrigation state
    fn irrigation_metrics(&self) -> IrrigationMetrics;
}

/// Provides system health on demand
pub trait SystemMetricsSource {
    /// Current system figures
    fn system_metrics(&self) -> SystemMetrics;
}

/// Provides link state on demand
pub trait NetworkMetricsSource {
    /// Current link state
    fn network_metrics(&self) -> NetworkMetrics;
}

impl IrrigationMetricsSource for IrrigationMetrics {
    fn irrigation_metrics(&self) -> IrrigationMetrics {
        *self
    }
}

impl SystemMetricsSource for SystemMetrics {
    fn system_metrics(&self) -> SystemMetrics {
        *self
    }
}

impl NetworkMetricsSource for NetworkMetrics {
    fn network_metrics(&self) -> NetworkMetrics {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_buckets() {
        assert_eq!(SignalQuality::from_rssi(-81), SignalQuality::Poor);
        assert_eq!(SignalQuality::from_rssi(-80), SignalQuality::Fair);
        assert_eq!(SignalQuality::from_rssi(-71), SignalQuality::Fair);
        assert_eq!(SignalQuality::from_rssi(-70), SignalQuality::Good);
        assert_eq!(SignalQuality::from_rssi(-61), SignalQuality::Good);
        assert_eq!(SignalQuality::from_rssi(-60), SignalQuality::Excellent);
        assert_eq!(SignalQuality::from_rssi(0), SignalQuality::Excellent);
    }

    #[test]
    fn irrigation_default_threshold() {
        let metrics = IrrigationMetrics::default();
        assert_eq!(metrics.threshold, 30.0);
        assert!(!metrics.active);
    }

    #[test]
    fn fixed_values_are_sources() {
        let network = NetworkMetrics { rssi_dbm: -65, ip: Ipv4Addr::new(10, 0, 0, 7) };
        assert_eq!(network.network_metrics(), network);
        assert_eq!(network.signal_quality().to_string(), "Good");
    }
}
