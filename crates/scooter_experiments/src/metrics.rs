//! Metrics extraction from completed simulation worlds.

use bevy_ecs::prelude::World;
use serde::Serialize;

use scooter_core::inventory::{HubInventory, StationInventories};
use scooter_core::telemetry::{HaulStats, MetricsLog, RideStats};

/// Aggregated outcome of a single run: the final per-turn metrics plus the
/// cumulative counters behind them.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub turns_run: u64,
    pub customers_served: u64,
    pub customers_dropped: u64,
    pub avg_wait_time: f64,
    pub under_utilization: f64,
    pub truck_utilization: f64,
    pub scooters_picked: u64,
    pub distance_travelled: u64,
    pub final_hub_level: u32,
    pub final_station_total: u32,
}

/// Pull the summary out of a world the runner has finished with.
pub fn extract_summary(world: &mut World, turns_run: u64) -> SimulationSummary {
    let ride = world
        .get_resource::<RideStats>()
        .expect("RideStats resource not found");
    let haul = world
        .get_resource::<HaulStats>()
        .expect("HaulStats resource not found");
    let log = world
        .get_resource::<MetricsLog>()
        .expect("MetricsLog resource not found");
    let hub = world
        .get_resource::<HubInventory>()
        .expect("HubInventory resource not found");
    let stations = world
        .get_resource::<StationInventories>()
        .expect("StationInventories resource not found");

    let last = log.rows.last();
    SimulationSummary {
        turns_run,
        customers_served: ride.customers_served,
        customers_dropped: ride.customers_dropped,
        avg_wait_time: last.map(|row| row.avg_wait_time).unwrap_or(0.0),
        under_utilization: last.map(|row| row.under_utilization).unwrap_or(0.0),
        truck_utilization: last.map(|row| row.truck_utilization).unwrap_or(0.0),
        scooters_picked: haul.scooters_picked,
        distance_travelled: haul.distance_travelled,
        final_hub_level: hub.level(),
        final_station_total: stations.total(),
    }
}
