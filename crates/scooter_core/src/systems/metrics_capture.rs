//! Metrics capture: append this turn's metrics row, and on the configured
//! interval a full display snapshot.

use bevy_ecs::prelude::{Entity, Query, Res, ResMut, With};

use crate::clock::TurnClock;
use crate::ecs::{Position, Ride, Scooter, Truck};
use crate::inventory::{HubInventory, StationInventories};
use crate::scenario::FleetConfig;
use crate::telemetry::{
    HaulStats, MetricsLog, MetricsRow, RideStats, ScooterSnapshot, SimSnapshot,
    SimSnapshotConfig, SimSnapshots, TruckSnapshot,
};

pub fn capture_metrics_system(
    clock: Res<TurnClock>,
    config: Res<FleetConfig>,
    ride: Res<RideStats>,
    haul: Res<HaulStats>,
    mut log: ResMut<MetricsLog>,
) {
    let turn = clock.now();
    log.rows.push(MetricsRow {
        turn,
        avg_wait_time: ride.avg_wait_time(),
        customers_dropped: ride.customers_dropped,
        under_utilization: ride.under_utilization(config.scooter_total, turn),
        truck_utilization: haul.truck_utilization(config.truck_count),
    });
}

/// Condition: the snapshot interval has elapsed (or nothing was captured yet).
pub fn should_capture_snapshot(
    clock: Option<Res<TurnClock>>,
    config: Option<Res<SimSnapshotConfig>>,
    snapshots: Option<Res<SimSnapshots>>,
) -> bool {
    let Some(clock) = clock else {
        return false;
    };
    let Some(config) = config else {
        return false;
    };
    let Some(snapshots) = snapshots else {
        return false;
    };

    match snapshots.last_snapshot_at {
        None => true,
        Some(last) => clock.now().saturating_sub(last) >= config.interval_turns,
    }
}

pub fn capture_snapshot_system(
    clock: Res<TurnClock>,
    config: Res<SimSnapshotConfig>,
    hub: Res<HubInventory>,
    stations: Res<StationInventories>,
    log: Res<MetricsLog>,
    mut snapshots: ResMut<SimSnapshots>,
    scooters: Query<(Entity, &Position, Option<&Ride>), With<Scooter>>,
    trucks: Query<(Entity, &Truck, &Position)>,
) {
    let turn = clock.now();
    let metrics = log.rows.last().copied().unwrap_or(MetricsRow {
        turn,
        avg_wait_time: 0.0,
        customers_dropped: 0,
        under_utilization: 0.0,
        truck_utilization: 0.0,
    });

    let snapshot = SimSnapshot {
        turn,
        hub_level: hub.level(),
        station_levels: stations.snapshot(),
        scooters: scooters
            .iter()
            .map(|(entity, position, ride)| ScooterSnapshot {
                entity,
                node: position.0,
                riding: ride.is_some(),
            })
            .collect(),
        trucks: trucks
            .iter()
            .map(|(entity, truck, position)| TruckSnapshot {
                entity,
                node: position.0,
                cargo: truck.cargo,
            })
            .collect(),
        metrics,
    };

    snapshots.snapshots.push_back(snapshot);
    while snapshots.snapshots.len() > config.max_snapshots {
        snapshots.snapshots.pop_front();
    }
    snapshots.last_snapshot_at = Some(turn);
}
