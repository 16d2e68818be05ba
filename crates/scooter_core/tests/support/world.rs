#![allow(dead_code)]

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, With, World};
use scooter_core::dispatch::DispatchPolicyKind;
use scooter_core::ecs::{Carried, CustomerRequest, HubQueue, Position, Ride, Scooter, Truck, TruckId};
use scooter_core::inventory::{HubInventory, StationInventories};
use scooter_core::network::{NetworkKind, NodeId};
use scooter_core::scenario::{build_scenario, ScenarioParams};
use scooter_core::topology::StationTopology;

/// Builder for full scenario worlds with a fixed seed, so integration tests
/// stay reproducible without each one spelling out the whole parameter set.
#[derive(Clone, Debug)]
pub struct TestWorldBuilder {
    params: ScenarioParams,
}

impl Default for TestWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorldBuilder {
    /// Small default scenario: 12×12 grid, 4 stations, 2 trucks, 30 scooters,
    /// seeded, replenishment off so inventory moves only through rides and
    /// trucks.
    pub fn new() -> Self {
        Self {
            params: ScenarioParams {
                station_count: 4,
                truck_count: 2,
                truck_capacity: 10,
                scooter_total: 30,
                arrival_rate: 5,
                wait_window: 3,
                replenish_prob: 0.0,
                ..Default::default()
            }
            .with_network(NetworkKind::Grid {
                width: 12,
                height: 12,
            })
            .with_seed(42),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params = self.params.with_seed(seed);
        self
    }

    pub fn with_policy(mut self, policy: DispatchPolicyKind) -> Self {
        self.params = self.params.with_policy(policy);
        self
    }

    pub fn with_arrival_rate(mut self, rate: u32) -> Self {
        self.params.arrival_rate = rate;
        self
    }

    pub fn with_replenish_prob(mut self, prob: f64) -> Self {
        self.params.replenish_prob = prob;
        self
    }

    pub fn with_truck_count(mut self, count: u32) -> Self {
        self.params.truck_count = count;
        self
    }

    pub fn with_end_turn(mut self, end_turn: u64) -> Self {
        self.params = self.params.with_end_turn(end_turn);
        self
    }

    pub fn with_params(mut self, adjust: impl FnOnce(&mut ScenarioParams)) -> Self {
        adjust(&mut self.params);
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new();
        build_scenario(&mut world, self.params).expect("test scenario should build");
        world
    }
}

/// Spawn `count` parked scooters at `node` and credit the matching station
/// inventory, keeping counters and entities consistent.
pub fn park_scooters_at_station(world: &mut World, node: NodeId, count: u32) {
    let station = world
        .resource::<StationTopology>()
        .station_index(node)
        .expect("node must be a station");
    for _ in 0..count {
        world.spawn((Scooter, Position(node)));
    }
    world
        .resource_mut::<StationInventories>()
        .deposit(station, count);
}

/// Enqueue `count` customer requests expiring at `expires_at`.
pub fn enqueue_requests(world: &mut World, count: usize, expires_at: u64) {
    let mut queue = world.resource_mut::<HubQueue>();
    for _ in 0..count {
        queue.0.push_back(CustomerRequest { expires_at });
    }
}

/// Relocate every truck to `node` (placement is random at build time).
pub fn place_trucks_at(world: &mut World, node: NodeId) {
    let trucks: Vec<Entity> = world
        .query_filtered::<Entity, With<Truck>>()
        .iter(world)
        .collect();
    for entity in trucks {
        world.get_mut::<Position>(entity).expect("truck position").0 = node;
    }
}

/// Spawn a single truck with an explicit id and position.
pub fn spawn_truck(world: &mut World, id: usize, node: NodeId, cargo: u32) -> Entity {
    world
        .spawn((Truck { cargo }, TruckId(id), Position(node)))
        .id()
}

/// Load `count` scooters onto an existing truck: spawns them carried, at the
/// truck's node, and raises the truck's cargo to match.
pub fn load_truck(world: &mut World, truck: Entity, count: u32) {
    let node = world.get::<Position>(truck).expect("truck position").0;
    for _ in 0..count {
        world.spawn((Scooter, Position(node), Carried(truck)));
    }
    world.get_mut::<Truck>(truck).expect("truck").cargo += count;
}

/// Conservation check: hub + stations + riding + trucked must equal `total`.
pub fn assert_scooters_conserved(world: &mut World, total: u32) {
    let hub = world.resource::<HubInventory>().level();
    let stations = world.resource::<StationInventories>().total();
    let riding = world
        .query_filtered::<(), (With<Scooter>, With<Ride>)>()
        .iter(world)
        .count() as u32;
    let trucked: u32 = world
        .query::<&Truck>()
        .iter(world)
        .map(|truck| truck.cargo)
        .sum();
    let carried_tags = world
        .query_filtered::<(), (With<Scooter>, With<Carried>)>()
        .iter(world)
        .count() as u32;

    assert_eq!(
        hub + stations + riding + trucked,
        total,
        "scooters leaked: hub {hub} + stations {stations} + riding {riding} + trucked {trucked}"
    );
    assert_eq!(
        trucked, carried_tags,
        "truck cargo counters disagree with carried scooter tags"
    );
}

/// Every ride currently assigned, as (scooter, remaining hops).
pub fn active_rides(world: &mut World) -> Vec<(Entity, VecDeque<NodeId>)> {
    world
        .query_filtered::<(Entity, &Ride), With<Scooter>>()
        .iter(world)
        .map(|(entity, ride)| (entity, ride.0.clone()))
        .collect()
}
