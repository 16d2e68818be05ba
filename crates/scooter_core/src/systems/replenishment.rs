//! Replenishment: parked scooters spontaneously return to the hub.
//!
//! Models customers who commute back on their own. With trucks disabled the
//! scenario raises the probability so the hub still refills; nothing here
//! branches on that, it is purely the configured rate.

use bevy_ecs::prelude::{Query, Res, ResMut, With, Without};
use rand::Rng;

use crate::ecs::{Carried, Position, Ride, Scooter};
use crate::inventory::{HubInventory, StationInventories};
use crate::scenario::{FleetConfig, SimRng};
use crate::topology::StationTopology;

pub fn replenishment_system(
    config: Res<FleetConfig>,
    topology: Res<StationTopology>,
    mut rng: ResMut<SimRng>,
    mut hub: ResMut<HubInventory>,
    mut stations: ResMut<StationInventories>,
    mut scooters: Query<&mut Position, (With<Scooter>, Without<Ride>, Without<Carried>)>,
) {
    if config.replenish_prob <= 0.0 {
        return;
    }
    let hub_node = topology.hub().id;
    for mut position in &mut scooters {
        let Some(station) = topology.station_index(position.0) else {
            continue;
        };
        if rng.0.gen::<f64>() < config.replenish_prob {
            stations.withdraw(station, 1);
            hub.deposit(1);
            position.0 = hub_node;
        }
    }
}
