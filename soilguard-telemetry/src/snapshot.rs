//! Telemetry Snapshot Assembly
//!
//! A [`TelemetrySnapshot`] is the only thing the reporting side sees: a copy
//! of the latest physical sample, the read counter, and the three external
//! metric groups, all captured at one point in time.
//!
//! ```text
//! AcquisitionManager ──data(), read_count()──┐
//! IrrigationMetricsSource ──────────────────┤
//! SystemMetricsSource ──────────────────────┼──► TelemetrySnapshot
//! NetworkMetricsSource ─────────────────────┘        │
//!                                          ┌─────────┴──────────┐
//!                                  TelemetryDocument      console line
//! ```
//!
//! Assembly is pure aggregation. It never waits on a collaborator: the
//! caller supplies every input up front, or hands over providers that answer
//! synchronously.

use soilguard_core::{AcquisitionManager, Clock, HardwareFacade, PhysicalSample, Timestamp};

use crate::metrics::{
    IrrigationMetrics, IrrigationMetricsSource, NetworkMetrics, NetworkMetricsSource,
    SystemMetrics, SystemMetricsSource,
};

/// Everything one telemetry report carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    /// Latest published sample
    pub sensors: PhysicalSample,
    /// Acquisition cycles run so far
    pub read_count: u32,
    /// Time the snapshot describes
    pub timestamp: Timestamp,
    /// Irrigation controller state
    pub irrigation: IrrigationMetrics,
    /// System health
    pub system: SystemMetrics,
    /// Wireless link
    pub network: NetworkMetrics,
}

impl TelemetrySnapshot {
    /// Aggregate a sample with externally supplied metrics
    ///
    /// The snapshot is stamped with the sample's own acquisition time.
    pub fn assemble(
        sample: &PhysicalSample,
        read_count: u32,
        irrigation: IrrigationMetrics,
        system: SystemMetrics,
        network: NetworkMetrics,
    ) -> Self {
        log::debug!("assembling telemetry for read #{}", read_count);
        Self {
            sensors: *sample,
            read_count,
            timestamp: sample.timestamp,
            irrigation,
            system,
            network,
        }
    }
}

/// Providers pulled by [`prepare_telemetry`]
#[derive(Clone, Copy)]
pub struct MetricSources<'a> {
    /// Irrigation controller
    pub irrigation: &'a dyn IrrigationMetricsSource,
    /// System monitor
    pub system: &'a dyn SystemMetricsSource,
    /// Network manager
    pub network: &'a dyn NetworkMetricsSource,
}

/// Snapshot of the manager's latest sample plus fresh provider readings
///
/// Stamped with the manager's clock at preparation time rather than the
/// sample's acquisition time.
pub fn prepare_telemetry<H, C, const N: usize>(
    manager: &AcquisitionManager<H, C, N>,
    sources: &MetricSources<'_>,
) -> TelemetrySnapshot
where
    H: HardwareFacade,
    C: Clock,
{
    let mut snapshot = TelemetrySnapshot::assemble(
        manager.data(),
        manager.read_count(),
        sources.irrigation.irrigation_metrics(),
        sources.system.system_metrics(),
        sources.network.network_metrics(),
    );
    snapshot.timestamp = manager.now();
    snapshot
}
