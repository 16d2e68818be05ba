//! Telemetry / KPIs: cumulative counters, the per-turn metrics log, and
//! display snapshots for the visualization layer.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, Resource};
use serde::Serialize;

use crate::network::NodeId;

/// Display size of a scooter dot while it is being ridden.
const RIDING_DOT_SIZE: f64 = 15.0;
/// Base display size for parked sites (hub, stations) and trucks.
const SITE_DOT_BASE: f64 = 40.0;

/// Cumulative counters from the scooter/customer core. All values only grow.
#[derive(Debug, Default, Resource)]
pub struct RideStats {
    pub customers_served: u64,
    pub customers_dropped: u64,
    /// Sum over served customers of the turns they waited.
    pub total_waiting_time: u64,
    /// Scooter-turns spent without an active ride. Parked scooters count
    /// too, so buffer stock at hub and stations reads as idle time.
    pub idle_scooter_turns: u64,
}

impl RideStats {
    /// Average customer waiting time, 0 before anyone has been served.
    pub fn avg_wait_time(&self) -> f64 {
        if self.customers_served == 0 {
            0.0
        } else {
            self.total_waiting_time as f64 / self.customers_served as f64
        }
    }

    /// Idle scooter-turns per scooter-turn, 0 at turn 0.
    pub fn under_utilization(&self, scooter_total: u32, turn: u64) -> f64 {
        if turn == 0 {
            0.0
        } else {
            self.idle_scooter_turns as f64 / (f64::from(scooter_total) * turn as f64)
        }
    }
}

/// Cumulative counters from the truck core.
#[derive(Debug, Default, Resource)]
pub struct HaulStats {
    pub scooters_picked: u64,
    /// Total hops taken by all trucks.
    pub distance_travelled: u64,
}

impl HaulStats {
    /// Scooters picked per truck-hop, 0 before any truck has moved.
    pub fn truck_utilization(&self, truck_count: u32) -> f64 {
        if self.distance_travelled == 0 {
            0.0
        } else {
            self.scooters_picked as f64
                / (f64::from(truck_count) * self.distance_travelled as f64)
        }
    }
}

/// One turn's metrics, in the stable column order the driver layer persists:
/// average wait, customers dropped, under-utilization, truck utilization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsRow {
    pub turn: u64,
    pub avg_wait_time: f64,
    pub customers_dropped: u64,
    pub under_utilization: f64,
    pub truck_utilization: f64,
}

/// Every turn's metrics row, appended by the capture system.
#[derive(Debug, Default, Resource)]
pub struct MetricsLog {
    pub rows: Vec<MetricsRow>,
}

/// Snapshot of one scooter for visualization/export.
#[derive(Debug, Clone)]
pub struct ScooterSnapshot {
    pub entity: Entity,
    pub node: NodeId,
    pub riding: bool,
}

impl ScooterSnapshot {
    /// Riding scooters render as a fixed-size dot; parked ones are hidden
    /// behind their site's aggregate dot.
    pub fn display_size(&self) -> f64 {
        if self.riding {
            RIDING_DOT_SIZE
        } else {
            0.0
        }
    }
}

/// Snapshot of one truck for visualization/export.
#[derive(Debug, Clone)]
pub struct TruckSnapshot {
    pub entity: Entity,
    pub node: NodeId,
    pub cargo: u32,
}

impl TruckSnapshot {
    pub fn display_size(&self) -> f64 {
        SITE_DOT_BASE + f64::from(self.cargo * self.cargo)
    }
}

/// Display size of a parked-scooter site (hub or station) holding `level`
/// scooters: quadratic so crowded sites dominate the picture.
pub fn site_display_size(level: u32) -> f64 {
    f64::from(level * level) + SITE_DOT_BASE
}

/// Full display state at the end of one turn.
#[derive(Debug, Clone)]
pub struct SimSnapshot {
    pub turn: u64,
    pub hub_level: u32,
    pub station_levels: Vec<u32>,
    pub scooters: Vec<ScooterSnapshot>,
    pub trucks: Vec<TruckSnapshot>,
    pub metrics: MetricsRow,
}

/// Snapshot capture configuration.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimSnapshotConfig {
    pub interval_turns: u64,
    pub max_snapshots: usize,
}

impl Default for SimSnapshotConfig {
    fn default() -> Self {
        Self {
            interval_turns: 1,
            max_snapshots: 10_000,
        }
    }
}

/// Rolling snapshot buffer.
#[derive(Debug, Default, Resource)]
pub struct SimSnapshots {
    pub snapshots: VecDeque<SimSnapshot>,
    pub last_snapshot_at: Option<u64>,
}
