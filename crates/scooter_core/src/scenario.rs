//! Scenario setup: validate parameters, wire hub and stations into the road
//! network, and populate the world with resources and agents.
//!
//! All configuration problems surface here as [`ScenarioError`] before a
//! single entity spawns; nothing fails mid-simulation over a bad parameter.

use bevy_ecs::prelude::{Resource, World};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use crate::clock::{SimulationEndTurn, TurnClock};
use crate::dispatch::{
    build_dispatch_policy, DispatchPolicyKind, DispatchPolicyResource, StationAging,
    UnknownPolicy,
};
use crate::ecs::{HubQueue, Position, Scooter, Truck, TruckId};
use crate::inventory::{HubInventory, StationInventories};
use crate::network::{build_road_network, NetworkKind, NodeId, RoadNetworkResource};
use crate::telemetry::{HaulStats, MetricsLog, RideStats, SimSnapshotConfig, SimSnapshots};
use crate::topology::{StationTopology, TopologyError};

/// Default fleet sizing, matching the reference deployment this simulation
/// was tuned against.
const DEFAULT_STATION_COUNT: usize = 10;
const DEFAULT_TRUCK_COUNT: u32 = 8;
const DEFAULT_TRUCK_CAPACITY: u32 = 10;
const DEFAULT_SCOOTER_TOTAL: u32 = 200;
/// Customers arriving at the hub per turn.
const DEFAULT_ARRIVAL_RATE: u32 = 30;
/// Turns a customer will wait before leaving.
const DEFAULT_WAIT_WINDOW: u64 = 3;
/// Per-turn probability that a parked scooter is ridden back to the hub.
const DEFAULT_REPLENISH_PROB: f64 = 0.005;

/// Errors raised while validating or building a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("station count must be positive")]
    NoStations,
    #[error("scooter total must be positive")]
    NoScooters,
    #[error("truck capacity must be positive when trucks are present")]
    ZeroTruckCapacity,
    #[error("customer wait window must be positive")]
    ZeroWaitWindow,
    #[error("replenish probability must lie in [0, 1], got {0}")]
    BadReplenishProbability(f64),
    #[error("hub and station nodes must be supplied together")]
    PartialSites,
    #[error("{got} station nodes supplied for a station count of {expected}")]
    StationCountMismatch { expected: usize, got: usize },
    #[error("network provides {available} nodes, need {needed} for hub and stations")]
    NotEnoughNodes { available: usize, needed: usize },
    #[error(transparent)]
    UnknownPolicy(#[from] UnknownPolicy),
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Fixed per-run configuration the systems read every turn.
#[derive(Debug, Clone, Copy, Resource)]
pub struct FleetConfig {
    pub scooter_total: u32,
    pub truck_count: u32,
    pub truck_capacity: u32,
    pub arrival_rate: u32,
    pub wait_window: u64,
    pub replenish_prob: f64,
}

/// The simulation's random source. One seeded generator serves every
/// stochastic step so a seed reproduces the run bit-for-bit; the setup draw
/// order (sites, idle weights, truck placement) is likewise fixed.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

/// Parameters for building a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub station_count: usize,
    pub truck_count: u32,
    pub truck_capacity: u32,
    pub scooter_total: u32,
    pub arrival_rate: u32,
    pub wait_window: u64,
    pub replenish_prob: f64,
    pub policy: DispatchPolicyKind,
    pub network: NetworkKind,
    /// Explicit hub node. When `None`, hub and stations are sampled from the
    /// network with the seeded generator.
    pub hub: Option<NodeId>,
    /// Explicit station nodes; length must equal `station_count`.
    pub stations: Option<Vec<NodeId>>,
    /// Random seed for reproducibility (optional; if None, uses entropy).
    pub seed: Option<u64>,
    /// Exclusive turn bound. If set, the runner stops before this turn.
    pub end_turn: Option<u64>,
    pub snapshot_config: Option<SimSnapshotConfig>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            station_count: DEFAULT_STATION_COUNT,
            truck_count: DEFAULT_TRUCK_COUNT,
            truck_capacity: DEFAULT_TRUCK_CAPACITY,
            scooter_total: DEFAULT_SCOOTER_TOTAL,
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            wait_window: DEFAULT_WAIT_WINDOW,
            replenish_prob: DEFAULT_REPLENISH_PROB,
            policy: DispatchPolicyKind::default(),
            network: NetworkKind::default(),
            hub: None,
            stations: None,
            seed: None,
            end_turn: None,
            snapshot_config: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_policy(mut self, policy: DispatchPolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Select the dispatch policy by its configuration name
    /// (`aging` / `greedy` / `combined`).
    pub fn with_policy_name(mut self, name: &str) -> Result<Self, ScenarioError> {
        self.policy = name.parse::<DispatchPolicyKind>()?;
        Ok(self)
    }

    pub fn with_network(mut self, network: NetworkKind) -> Self {
        self.network = network;
        self
    }

    /// Pin hub and stations to explicit nodes instead of sampling them.
    /// Also sets `station_count` to the list length.
    pub fn with_sites(mut self, hub: NodeId, stations: Vec<NodeId>) -> Self {
        self.station_count = stations.len();
        self.hub = Some(hub);
        self.stations = Some(stations);
        self
    }

    /// Bound the run: the runner executes turns `0..end_turn` and no more.
    pub fn with_end_turn(mut self, end_turn: u64) -> Self {
        self.end_turn = Some(end_turn);
        self
    }

    pub fn with_replenish_prob(mut self, prob: f64) -> Self {
        self.replenish_prob = prob;
        self
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if self.station_count == 0 {
            return Err(ScenarioError::NoStations);
        }
        if self.scooter_total == 0 {
            return Err(ScenarioError::NoScooters);
        }
        if self.truck_count > 0 && self.truck_capacity == 0 {
            return Err(ScenarioError::ZeroTruckCapacity);
        }
        if self.wait_window == 0 {
            return Err(ScenarioError::ZeroWaitWindow);
        }
        if !(0.0..=1.0).contains(&self.replenish_prob) {
            return Err(ScenarioError::BadReplenishProbability(self.replenish_prob));
        }
        if self.hub.is_some() != self.stations.is_some() {
            return Err(ScenarioError::PartialSites);
        }
        if let Some(stations) = &self.stations {
            if stations.len() != self.station_count {
                return Err(ScenarioError::StationCountMismatch {
                    expected: self.station_count,
                    got: stations.len(),
                });
            }
        }
        Ok(())
    }
}

/// Populates `world` with the clock, inventories, telemetry, policy, network
/// and topology resources, then spawns every scooter at the hub and every
/// truck at a random node. Caller must have already created `world`.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), ScenarioError> {
    params.validate()?;

    let mut rng: StdRng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let network = build_road_network(&params.network);
    let node_ids = network.node_ids();

    let (hub, stations) = match (params.hub, params.stations.clone()) {
        (Some(hub), Some(stations)) => (hub, stations),
        _ => {
            let needed = params.station_count + 1;
            let mut picks: Vec<NodeId> = node_ids
                .choose_multiple(&mut rng, needed)
                .copied()
                .collect();
            if picks.len() < needed {
                return Err(ScenarioError::NotEnoughNodes {
                    available: node_ids.len(),
                    needed,
                });
            }
            let hub = picks.remove(0);
            (hub, picks)
        }
    };

    let topology = StationTopology::new(network.as_ref(), hub, &stations)?;
    let aging = StationAging::new(topology.station_count(), &mut rng);

    for _ in 0..params.scooter_total {
        world.spawn((Scooter, Position(hub)));
    }
    for index in 0..params.truck_count {
        let node = *node_ids
            .choose(&mut rng)
            .expect("validated network has nodes");
        world.spawn((Truck { cargo: 0 }, TruckId(index as usize), Position(node)));
    }

    world.insert_resource(TurnClock::default());
    world.insert_resource(FleetConfig {
        scooter_total: params.scooter_total,
        truck_count: params.truck_count,
        truck_capacity: params.truck_capacity,
        arrival_rate: params.arrival_rate,
        wait_window: params.wait_window,
        replenish_prob: params.replenish_prob,
    });
    world.insert_resource(HubInventory::new(params.scooter_total));
    world.insert_resource(StationInventories::new(topology.station_count()));
    world.insert_resource(HubQueue::default());
    world.insert_resource(RideStats::default());
    world.insert_resource(HaulStats::default());
    world.insert_resource(MetricsLog::default());
    world.insert_resource(params.snapshot_config.unwrap_or_default());
    world.insert_resource(SimSnapshots::default());
    world.insert_resource(aging);
    world.insert_resource(DispatchPolicyResource::new(build_dispatch_policy(
        params.policy,
    )));
    world.insert_resource(topology);
    world.insert_resource(RoadNetworkResource::new(network));
    world.insert_resource(SimRng(rng));
    if let Some(end_turn) = params.end_turn {
        world.insert_resource(SimulationEndTurn(end_turn));
    }

    Ok(())
}
