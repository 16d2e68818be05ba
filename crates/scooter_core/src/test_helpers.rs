//! Test helpers for common fixture setup.
//!
//! Shared across in-crate unit tests and the integration suites to avoid
//! each test hand-rolling the same small world.

use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::TurnClock;
use crate::dispatch::{DispatchPolicyResource, GreedyPolicy, StationAging};
use crate::ecs::HubQueue;
use crate::inventory::{HubInventory, StationInventories};
use crate::network::{GridRoadNetwork, NodeId, RoadNetworkResource};
use crate::scenario::{FleetConfig, SimRng};
use crate::telemetry::{HaulStats, MetricsLog, RideStats, SimSnapshotConfig, SimSnapshots};
use crate::topology::StationTopology;

/// Standard test geography: an 8×8 grid with the hub in the middle and two
/// stations at opposite corners.
pub const TEST_HUB: NodeId = NodeId(27);
pub const TEST_STATION_NEAR: NodeId = NodeId(0);
pub const TEST_STATION_FAR: NodeId = NodeId(63);

pub fn test_network() -> GridRoadNetwork {
    GridRoadNetwork::new(8, 8)
}

pub fn test_topology() -> StationTopology {
    StationTopology::new(&test_network(), TEST_HUB, &[TEST_STATION_NEAR, TEST_STATION_FAR])
        .expect("test topology should build")
}

/// A small fleet configuration sized for hand-checkable tests: replenishment
/// off, so inventory only moves through rides and trucks.
pub fn test_config() -> FleetConfig {
    FleetConfig {
        scooter_total: 10,
        truck_count: 1,
        truck_capacity: 10,
        arrival_rate: 0,
        wait_window: 3,
        replenish_prob: 0.0,
    }
}

/// Create a world with every resource the simulation schedule needs, built
/// around [`test_topology`]. Entities are left to the caller.
pub fn create_test_world() -> World {
    let topology = test_topology();
    let station_count = topology.station_count();

    let mut world = World::new();
    world.insert_resource(TurnClock::default());
    world.insert_resource(test_config());
    world.insert_resource(HubInventory::new(test_config().scooter_total));
    world.insert_resource(StationInventories::new(station_count));
    world.insert_resource(HubQueue::default());
    world.insert_resource(RideStats::default());
    world.insert_resource(HaulStats::default());
    world.insert_resource(MetricsLog::default());
    world.insert_resource(SimSnapshotConfig::default());
    world.insert_resource(SimSnapshots::default());
    world.insert_resource(StationAging::with_state(
        vec![1; station_count],
        vec![0.1; station_count],
    ));
    world.insert_resource(DispatchPolicyResource::new(Box::new(GreedyPolicy)));
    world.insert_resource(topology);
    world.insert_resource(RoadNetworkResource::new(Box::new(test_network())));
    world.insert_resource(SimRng(StdRng::seed_from_u64(1)));
    world
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_places_hub_between_stations() {
        let topology = test_topology();
        assert!(topology.is_hub(TEST_HUB));
        assert_eq!(topology.station_index(TEST_STATION_NEAR), Some(0));
        assert_eq!(topology.station_index(TEST_STATION_FAR), Some(1));
    }

    #[test]
    fn create_test_world_has_consistent_inventory() {
        let world = create_test_world();
        let hub = world.resource::<HubInventory>();
        let config = world.resource::<FleetConfig>();
        assert_eq!(hub.level(), config.scooter_total);
    }
}
