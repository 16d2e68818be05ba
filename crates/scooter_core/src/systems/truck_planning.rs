//! Truck planning: assign a destination to every routeless truck.
//!
//! Trucks are processed in `TruckId` order against a *speculative* copy of
//! the station inventories: each committed pickup is reserved out of the
//! copy, so two trucks planned in the same pass can never be routed to drain
//! more scooters than a station actually holds. A truck whose best station
//! offers nothing stays idle this turn and is reconsidered next turn, after
//! other trucks' claims have settled.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Commands, Entity, Query, Res, Without};

use crate::dispatch::{DispatchContext, DispatchPolicyResource, StationAging};
use crate::ecs::{Position, Truck, TruckId, TruckRoute};
use crate::inventory::StationInventories;
use crate::network::{NodeId, RoadNetwork, RoadNetworkResource};
use crate::scenario::FleetConfig;
use crate::topology::StationTopology;

pub fn truck_planning_system(
    config: Res<FleetConfig>,
    topology: Res<StationTopology>,
    network: Res<RoadNetworkResource>,
    aging: Res<StationAging>,
    policy: Res<DispatchPolicyResource>,
    stations: Res<StationInventories>,
    mut commands: Commands,
    trucks: Query<(Entity, &TruckId, &Truck, &Position), Without<TruckRoute>>,
) {
    let mut speculative = stations.snapshot();
    let mut idle: Vec<(Entity, &TruckId, &Truck, &Position)> = trucks.iter().collect();
    idle.sort_by_key(|(_, id, _, _)| **id);

    let ctx = DispatchContext {
        network: &**network,
        topology: &*topology,
        aging: &*aging,
        capacity: config.truck_capacity,
    };

    for (entity, _, truck, position) in idle {
        if truck.cargo == config.truck_capacity {
            // Full: head home and unload.
            if let Some(route) = route_to(&**network, position.0, topology.hub().id) {
                commands.entity(entity).insert(route);
            }
            continue;
        }

        let choice = policy.select_target(position.0, truck.cargo, &speculative, &ctx);
        let take = (config.truck_capacity - truck.cargo).min(speculative[choice.station]);
        if take == 0 {
            continue;
        }
        speculative[choice.station] -= take;
        let target = topology.station_node(choice.station).id;
        if let Some(route) = route_to(&**network, position.0, target) {
            commands.entity(entity).insert(route);
        }
    }
}

/// Shortest path with the truck's own node dropped. `None` when there is no
/// path or nothing remains after the drop (the truck is already there).
fn route_to(network: &dyn RoadNetwork, from: NodeId, to: NodeId) -> Option<TruckRoute> {
    let path = network.shortest_path(from, to)?;
    let hops: VecDeque<NodeId> = path.into_iter().skip(1).collect();
    if hops.is_empty() {
        None
    } else {
        Some(TruckRoute(hops))
    }
}
