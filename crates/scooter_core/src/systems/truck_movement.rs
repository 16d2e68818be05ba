//! Truck movement: every routed truck advances one hop and executes any
//! pickup or delivery its new node implies.
//!
//! A hub hit unloads the full cargo; a station hit (even one merely passed
//! through) picks up whatever fits and ends the route, so the truck replans
//! from there next turn. Loaded scooters are tagged [`Carried`] so the
//! inventory counters and the scooter entities never disagree about where a
//! scooter is. After all trucks have moved, every station's
//! turns-without-visit counter ages by one — including a station visited this
//! very turn, whose counter therefore reads 1 at the next planning pass.

use std::collections::HashSet;

use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut, With, Without};

use crate::dispatch::StationAging;
use crate::ecs::{Carried, Position, Ride, Scooter, Truck, TruckId, TruckRoute};
use crate::inventory::{HubInventory, StationInventories};
use crate::network::NodeId;
use crate::scenario::FleetConfig;
use crate::telemetry::HaulStats;
use crate::topology::StationTopology;

#[allow(clippy::type_complexity)]
pub fn truck_movement_system(
    config: Res<FleetConfig>,
    topology: Res<StationTopology>,
    mut hub: ResMut<HubInventory>,
    mut stations: ResMut<StationInventories>,
    mut aging: ResMut<StationAging>,
    mut haul: ResMut<HaulStats>,
    mut commands: Commands,
    mut trucks: Query<(Entity, &TruckId, &mut Truck, &mut Position, &mut TruckRoute)>,
    parked: Query<
        (Entity, &Position),
        (With<Scooter>, Without<Ride>, Without<Carried>, Without<Truck>),
    >,
    mut carried: Query<(Entity, &mut Position, &Carried), Without<Truck>>,
) {
    // Fixed processing order so pickup contention at a shared station is
    // deterministic.
    let mut order: Vec<(TruckId, Entity)> = trucks
        .iter()
        .map(|(entity, id, _, _, _)| (*id, entity))
        .collect();
    order.sort_by_key(|(id, _)| *id);

    // Pickups are deferred commands; claimed scooters must not be handed to
    // a second truck within this pass.
    let mut claimed: HashSet<Entity> = HashSet::new();
    let hub_node = topology.hub().id;

    for (_, truck_entity) in order {
        let Ok((_, _, mut truck, mut position, mut route)) = trucks.get_mut(truck_entity) else {
            continue;
        };
        let Some(next) = route.0.pop_front() else {
            // Routes are non-empty by invariant; planning never assigns one
            // with no hops.
            debug_assert!(false, "truck {truck_entity:?} carries an empty route");
            commands.entity(truck_entity).remove::<TruckRoute>();
            continue;
        };

        haul.distance_travelled += 1;
        position.0 = next;

        if topology.is_hub(next) {
            unload(
                truck_entity,
                &truck,
                hub_node,
                &mut commands,
                &mut carried,
            );
            hub.deposit(truck.cargo);
            truck.cargo = 0;
            commands.entity(truck_entity).remove::<TruckRoute>();
        } else if let Some(station) = topology.station_index(next) {
            let take = (config.truck_capacity - truck.cargo).min(stations.level(station));
            load(
                truck_entity,
                next,
                take,
                &parked,
                &mut claimed,
                &mut commands,
            );
            stations.withdraw(station, take);
            truck.cargo += take;
            aging.record_visit(station);
            haul.scooters_picked += u64::from(take);
            commands.entity(truck_entity).remove::<TruckRoute>();
        }
    }

    aging.age_all();
}

/// Tag `take` parked scooters at `node` as carried by `truck`.
#[allow(clippy::type_complexity)]
fn load(
    truck: Entity,
    node: NodeId,
    take: u32,
    parked: &Query<
        (Entity, &Position),
        (With<Scooter>, Without<Ride>, Without<Carried>, Without<Truck>),
    >,
    claimed: &mut HashSet<Entity>,
    commands: &mut Commands,
) {
    let mut remaining = take;
    for (scooter, position) in parked.iter() {
        if remaining == 0 {
            break;
        }
        if position.0 != node || !claimed.insert(scooter) {
            continue;
        }
        commands.entity(scooter).insert(Carried(truck));
        remaining -= 1;
    }
    // The station inventory said `take` scooters were parked here.
    debug_assert!(
        remaining == 0,
        "station at {node:?} is short {remaining} parked scooters"
    );
}

/// Drop every scooter carried by `truck` at the hub.
fn unload(
    truck: Entity,
    truck_state: &Truck,
    hub_node: NodeId,
    commands: &mut Commands,
    carried: &mut Query<(Entity, &mut Position, &Carried), Without<Truck>>,
) {
    let mut dropped = 0u32;
    for (scooter, mut position, tag) in carried.iter_mut() {
        if tag.0 != truck {
            continue;
        }
        position.0 = hub_node;
        commands.entity(scooter).remove::<Carried>();
        dropped += 1;
    }
    debug_assert!(
        dropped == truck_state.cargo,
        "truck cargo {} but {} carried scooters on board",
        truck_state.cargo,
        dropped
    );
}
