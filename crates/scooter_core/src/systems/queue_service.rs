//! Queue service: pair waiting customers with scooters parked at the hub.
//!
//! The queue drains front-first. Expired requests drop; live ones are served
//! while hub inventory lasts, each rider getting a uniformly random station
//! and the precomputed hub path to it. When the hub runs dry the rest of the
//! queue simply waits for a future turn.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut, With, Without};
use rand::Rng;

use crate::clock::TurnClock;
use crate::ecs::{Carried, HubQueue, Position, Ride, Scooter};
use crate::inventory::HubInventory;
use crate::network::NodeId;
use crate::scenario::{FleetConfig, SimRng};
use crate::telemetry::RideStats;
use crate::topology::StationTopology;

pub fn queue_service_system(
    clock: Res<TurnClock>,
    config: Res<FleetConfig>,
    topology: Res<StationTopology>,
    mut rng: ResMut<SimRng>,
    mut queue: ResMut<HubQueue>,
    mut hub: ResMut<HubInventory>,
    mut stats: ResMut<RideStats>,
    mut commands: Commands,
    scooters: Query<(Entity, &Position), (With<Scooter>, Without<Ride>, Without<Carried>)>,
) {
    let turn = clock.now();
    let hub_node = topology.hub().id;

    // Ride assignments are deferred commands, so the query won't reflect them
    // until the sync point; hand scooters out of a local pool instead.
    let mut idle_at_hub: VecDeque<Entity> = scooters
        .iter()
        .filter(|(_, position)| position.0 == hub_node)
        .map(|(entity, _)| entity)
        .collect();

    while let Some(request) = queue.0.front().copied() {
        if request.expires_at == turn {
            queue.0.pop_front();
            stats.customers_dropped += 1;
            continue;
        }
        if hub.level() == 0 {
            break;
        }
        let Some(scooter) = idle_at_hub.pop_front() else {
            // Positive hub inventory with no idle scooter parked here means
            // the counter and the scooter states have diverged. Surface it;
            // deferring the queue is the only safe recovery.
            debug_assert!(
                false,
                "hub inventory is {} but no idle scooter is parked at the hub",
                hub.level()
            );
            break;
        };

        let station = rng.0.gen_range(0..topology.station_count());
        let ride: VecDeque<NodeId> = topology.hub_path(station).iter().copied().collect();
        commands.entity(scooter).insert(Ride(ride));

        hub.withdraw(1);
        queue.0.pop_front();
        stats.customers_served += 1;
        // The request stores only its expiry; turns actually waited is
        // wait_window + turn - expiry.
        stats.total_waiting_time += (config.wait_window + turn) - request.expires_at;
    }
}
