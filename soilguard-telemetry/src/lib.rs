//! Telemetry for SoilGuard Field Nodes
//!
//! ## Overview
//!
//! Sits on top of `soilguard-core` and turns the latest acquisition result
//! into the reports a node publishes. The core knows nothing about memory
//! statistics, Wi-Fi or irrigation; this crate gathers those from provider
//! traits, combines them with the published sample and renders the result.
//!
//! ## Outputs
//!
//! - **Structured document**: nested JSON with `sensors`, `irrigation` and
//!   `stats` groups, for the web API and collectors
//!   ([`TelemetryDocument`])
//! - **Console lines**: one fixed-layout line per category for the serial
//!   console ([`TelemetryCategory`])
//!
//! The host side of the serial link reads documents back with
//! [`parse_telemetry_line`].
//!
//! ## Example
//!
//! ```rust
//! use std::net::Ipv4Addr;
//!
//! use soilguard_core::PhysicalSample;
//! use soilguard_telemetry::{
//!     IrrigationMetrics, NetworkMetrics, SystemMetrics, TelemetryCategory, TelemetrySnapshot,
//! };
//!
//! let snapshot = TelemetrySnapshot::assemble(
//!     &PhysicalSample::default(),
//!     1,
//!     IrrigationMetrics::default(),
//!     SystemMetrics { free_heap: 180_000, uptime_s: 60, ..SystemMetrics::default() },
//!     NetworkMetrics { rssi_dbm: -58, ip: Ipv4Addr::new(10, 0, 0, 2) },
//! );
//!
//! let json = snapshot.to_json_string()?;
//! assert!(json.contains("\"ipAddress\":\"10.0.0.2\""));
//!
//! let line = snapshot.console_line(TelemetryCategory::Wifi)?;
//! assert!(line.ends_with("Signal: Excellent"));
//! # Ok::<(), soilguard_telemetry::TelemetryError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod console;
pub mod document;
pub mod errors;
pub mod metrics;
pub mod snapshot;

pub use console::{ConsoleLine, TelemetryCategory};
pub use document::{parse_telemetry_line, TelemetryDocument};
pub use errors::{TelemetryError, TelemetryResult};
pub use metrics::{
    IrrigationMetrics, IrrigationMetricsSource, NetworkMetrics, NetworkMetricsSource,
    SignalQuality, SystemMetrics, SystemMetricsSource,
};
pub use snapshot::{prepare_telemetry, MetricSources, TelemetrySnapshot};
