//! Structured Telemetry Document
//!
//! The nested JSON document published for a [`TelemetrySnapshot`]. Field
//! names are fixed; downstream collectors key on them:
//!
//! ```json
//! {
//!   "sensors":    { "ph": 6.5, "temperature": 24.3, "humidity": 55.0,
//!                   "phosphorus": true, "potassium": false,
//!                   "timestamp": 12345, "readCount": 42 },
//!   "irrigation": { "active": false, "uptime": 0, "lastActivation": 0,
//!                   "activations": 0, "threshold": 30.0 },
//!   "stats":      { "freeHeap": 180000, "fragmentation": 12, "uptime": 3600,
//!                   "wifiRssi": -65, "ipAddress": "192.168.1.50" }
//! }
//! ```
//!
//! A reading the sensor could not deliver (NaN) is written as `null` and
//! read back as NaN.
//!
//! On the serial console the document shares lines with ordinary log output;
//! [`parse_telemetry_line`] recovers it from such a line.

use serde::{Deserialize, Serialize};

use crate::errors::{TelemetryError, TelemetryResult};
use crate::snapshot::TelemetrySnapshot;

/// Serialized form of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryDocument {
    /// Sensor readings
    pub sensors: SensorsGroup,
    /// Irrigation controller
    pub irrigation: IrrigationGroup,
    /// System and network statistics
    pub stats: StatsGroup,
}

/// `sensors` group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorsGroup {
    /// Soil pH
    #[serde(deserialize_with = "null_as_nan")]
    pub ph: f32,
    /// Air temperature (°C)
    #[serde(deserialize_with = "null_as_nan")]
    pub temperature: f32,
    /// Relative humidity (%)
    #[serde(deserialize_with = "null_as_nan")]
    pub humidity: f32,
    /// Phosphorus detected
    pub phosphorus: bool,
    /// Potassium detected
    pub potassium: bool,
    /// Snapshot time (ms since boot)
    pub timestamp: u32,
    /// Acquisition cycles run so far
    pub read_count: u32,
}

/// `irrigation` group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationGroup {
    /// Pump running
    pub active: bool,
    /// Seconds in the current activation
    pub uptime: u32,
    /// Time of the last activation (ms since boot)
    pub last_activation: u32,
    /// Activations today
    pub activations: u32,
    /// Moisture threshold (%)
    pub threshold: f32,
}

/// `stats` group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsGroup {
    /// Free heap in bytes
    pub free_heap: u32,
    /// Heap fragmentation (%)
    pub fragmentation: u8,
    /// Seconds since boot
    pub uptime: u32,
    /// Signal strength (dBm)
    pub wifi_rssi: i32,
    /// Station address, dotted quad
    pub ip_address: String,
}

impl From<&TelemetrySnapshot> for TelemetryDocument {
    fn from(snapshot: &TelemetrySnapshot) -> Self {
        let sensors = &snapshot.sensors;
        let irrigation = &snapshot.irrigation;
        let system = &snapshot.system;

        Self {
            sensors: SensorsGroup {
                ph: sensors.ph,
                temperature: sensors.temperature,
                humidity: sensors.humidity,
                phosphorus: sensors.phosphorus,
                potassium: sensors.potassium,
                timestamp: snapshot.timestamp,
                read_count: snapshot.read_count,
            },
            irrigation: IrrigationGroup {
                active: irrigation.active,
                uptime: irrigation.uptime_s,
                last_activation: irrigation.last_activation,
                activations: irrigation.activations,
                threshold: irrigation.threshold,
            },
            stats: StatsGroup {
                free_heap: system.free_heap,
                fragmentation: system.fragmentation_pct,
                uptime: system.uptime_s,
                wifi_rssi: snapshot.network.rssi_dbm,
                ip_address: snapshot.network.ip.to_string(),
            },
        }
    }
}

impl TelemetryDocument {
    /// Compact single-line JSON
    pub fn to_json_string(&self) -> TelemetryResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON for humans
    pub fn to_json_pretty(&self) -> TelemetryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generic JSON value, for callers merging the document into a larger one
    pub fn to_value(&self) -> TelemetryResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse a bare JSON document
    pub fn from_json(json: &str) -> TelemetryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TelemetrySnapshot {
    /// Structured document for this snapshot
    pub fn document(&self) -> TelemetryDocument {
        TelemetryDocument::from(self)
    }

    /// Structured document as compact JSON
    pub fn to_json_string(&self) -> TelemetryResult<String> {
        self.document().to_json_string()
    }
}

/// Extract and parse the document embedded in a serial console line
///
/// Takes everything from the first `{` to the last `}`; text around it (log
/// prefixes, trailing carriage returns) is ignored.
pub fn parse_telemetry_line(line: &str) -> TelemetryResult<TelemetryDocument> {
    let start = line.find('{').ok_or(TelemetryError::NoDocument)?;
    let end = line.rfind('}').ok_or(TelemetryError::NoDocument)?;
    if end <= start {
        return Err(TelemetryError::NoDocument);
    }

    TelemetryDocument::from_json(&line[start..=end])
}

fn null_as_nan<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use serde_json::json;
    use soilguard_core::PhysicalSample;

    use super::*;
    use crate::metrics::{IrrigationMetrics, NetworkMetrics, SystemMetrics};

    fn snapshot() -> TelemetrySnapshot {
        TelemetrySnapshot::assemble(
            &PhysicalSample {
                ph: 6.5,
                temperature: 24.5,
                humidity: 55.0,
                phosphorus: true,
                potassium: false,
                timestamp: 12_345,
            },
            42,
            IrrigationMetrics::default(),
            SystemMetrics {
                free_heap: 180_000,
                min_free_heap: 150_000,
                fragmentation_pct: 12,
                cpu_load_pct: 40,
                uptime_s: 3600,
            },
            NetworkMetrics { rssi_dbm: -65, ip: Ipv4Addr::new(192, 168, 1, 50) },
        )
    }

    #[test]
    fn document_field_names() {
        let value = snapshot().document().to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "sensors": {
                    "ph": 6.5, "temperature": 24.5, "humidity": 55.0,
                    "phosphorus": true, "potassium": false,
                    "timestamp": 12345, "readCount": 42
                },
                "irrigation": {
                    "active": false, "uptime": 0, "lastActivation": 0,
                    "activations": 0, "threshold": 30.0
                },
                "stats": {
                    "freeHeap": 180000, "fragmentation": 12, "uptime": 3600,
                    "wifiRssi": -65, "ipAddress": "192.168.1.50"
                }
            })
        );
    }

    #[test]
    fn parse_line_with_prefix() {
        let json = snapshot().to_json_string().unwrap();
        let line = format!("[TELEMETRY] {json}\r");

        let parsed = parse_telemetry_line(&line).unwrap();
        assert_eq!(parsed, snapshot().document());
    }

    #[test]
    fn line_without_document() {
        assert!(matches!(parse_telemetry_line("Sensors → pH: 6.5"), Err(TelemetryError::NoDocument)));
        assert!(matches!(parse_telemetry_line("} then {"), Err(TelemetryError::NoDocument)));
        assert!(matches!(parse_telemetry_line("{broken}"), Err(TelemetryError::Json(_))));
    }

    #[test]
    fn pretty_json_parses_back() {
        let pretty = snapshot().document().to_json_pretty().unwrap();
        assert!(pretty.contains('\n'));
        assert!(pretty.contains("  \"sensors\": {"));

        let parsed = TelemetryDocument::from_json(&pretty).unwrap();
        assert_eq!(parsed, snapshot().document());
    }

    #[test]
    fn nan_reading_round_trips_as_null() {
        let mut snap = snapshot();
        snap.sensors.humidity = f32::NAN;

        let json = snap.to_json_string().unwrap();
        assert!(json.contains("\"humidity\":null"));

        let parsed = TelemetryDocument::from_json(&json).unwrap();
        assert!(parsed.sensors.humidity.is_nan());
        assert_eq!(parsed.sensors.ph, 6.5);
    }
}
