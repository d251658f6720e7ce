//! Console Line Rendering
//!
//! Human-readable, single-line views of a snapshot for the serial console.
//! Log parsers downstream rely on the field order and units, so the layouts
//! are fixed:
//!
//! ```text
//! SENSORS  Sensors → pH: 6.5   Temp: 24.3 °C  Hum: 55.0% P: PRESENT   K: ABSENT
//! SYSTEM   System   → Uptime: 3600  s  Heap: 180000  bytes  Frag: 12%
//! WIFI     WiFi Status → IP: 192.168.1.50 | RSSI: -65 dBm | Signal: Good
//! ALL      Sensors: pH=6.5 T=24.3°C H=55.0% P=1 K=0 | Irrigation: OFF Up=0s Act=0 | Sys: Heap=180000 Up=3600s | WiFi: 192.168.1.50
//! ```
//!
//! Lines are rendered into fixed-capacity storage. A line that does not fit
//! is reported as [`TelemetryError::BufferTooSmall`]; it is never cut short.

use core::fmt::{self, Write};

use soilguard_core::constants::buffers::CONSOLE_LINE_CAPACITY;
use soilguard_core::events::presence_label;
use soilguard_core::text::BoundedWriter;

use crate::errors::{TelemetryError, TelemetryResult};
use crate::snapshot::TelemetrySnapshot;

/// Line with the default console capacity
pub type ConsoleLine = heapless::String<CONSOLE_LINE_CAPACITY>;

/// Which view of the snapshot to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryCategory {
    /// Sensor readings
    Sensors,
    /// Uptime and memory
    System,
    /// Wireless link
    Wifi,
    /// Condensed summary of everything
    All,
}

impl TelemetryCategory {
    /// Every category, in console order
    pub const ALL_CATEGORIES: [TelemetryCategory; 4] = [
        TelemetryCategory::Sensors,
        TelemetryCategory::System,
        TelemetryCategory::Wifi,
        TelemetryCategory::All,
    ];

    /// Category from its console name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL_CATEGORIES
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Console name
    pub const fn name(&self) -> &'static str {
        match self {
            TelemetryCategory::Sensors => "SENSORS",
            TelemetryCategory::System => "SYSTEM",
            TelemetryCategory::Wifi => "WIFI",
            TelemetryCategory::All => "ALL",
        }
    }
}

impl fmt::Display for TelemetryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TelemetrySnapshot {
    /// Render one category into a string of capacity `CAP`
    pub fn render_line<const CAP: usize>(
        &self,
        category: TelemetryCategory,
    ) -> TelemetryResult<heapless::String<CAP>> {
        let mut line = heapless::String::new();
        self.fmt_line(category, &mut line).map_err(|_| {
            log::warn!("{} line exceeds {} bytes", category, CAP);
            TelemetryError::BufferTooSmall { capacity: CAP }
        })?;
        Ok(line)
    }

    /// Render one category with the default console capacity
    pub fn console_line(&self, category: TelemetryCategory) -> TelemetryResult<ConsoleLine> {
        self.render_line(category)
    }

    /// Render one category into `buf`, returning the number of bytes written
    pub fn write_line(&self, category: TelemetryCategory, buf: &mut [u8]) -> TelemetryResult<usize> {
        let capacity = buf.len();
        let mut writer = BoundedWriter::new(buf);
        self.fmt_line(category, &mut writer).map_err(|_| {
            log::warn!("{} line exceeds {} bytes", category, capacity);
            TelemetryError::BufferTooSmall { capacity }
        })?;
        Ok(writer.len())
    }

    fn fmt_line<W: Write>(&self, category: TelemetryCategory, out: &mut W) -> fmt::Result {
        let sensors = &self.sensors;
        let system = &self.system;
        let network = &self.network;

        match category {
            TelemetryCategory::Sensors => write!(
                out,
                "Sensors → pH: {:.1}   Temp: {:.1} °C  Hum: {:.1}% P: {}   K: {}",
                sensors.ph,
                sensors.temperature,
                sensors.humidity,
                presence_label(sensors.phosphorus),
                presence_label(sensors.potassium),
            ),
            TelemetryCategory::System => write!(
                out,
                "System   → Uptime: {:<5} s  Heap: {:<7} bytes  Frag: {}%",
                system.uptime_s, system.free_heap, system.fragmentation_pct,
            ),
            TelemetryCategory::Wifi => write!(
                out,
                "WiFi Status → IP: {} | RSSI: {} dBm | Signal: {}",
                network.ip,
                network.rssi_dbm,
                network.signal_quality(),
            ),
            TelemetryCategory::All => write!(
                out,
                "Sensors: pH={:.1} T={:.1}°C H={:.1}% P={} K={} | Irrigation: {} Up={}s Act={} | Sys: Heap={} Up={}s | WiFi: {}",
                sensors.ph,
                sensors.temperature,
                sensors.humidity,
                u8::from(sensors.phosphorus),
                u8::from(sensors.potassium),
                if self.irrigation.active { "ON" } else { "OFF" },
                self.irrigation.uptime_s,
                self.irrigation.activations,
                system.free_heap,
                system.uptime_s,
                network.ip,
            ),
        }
    }
}
