//! Transit advance: riding scooters take their next hop; a ride that empties
//! has arrived at its station.

use bevy_ecs::prelude::{Commands, Entity, Query, ResMut, Res, With};

use crate::ecs::{Position, Ride, Scooter};
use crate::inventory::StationInventories;
use crate::topology::StationTopology;

pub fn scooter_transit_system(
    topology: Res<StationTopology>,
    mut stations: ResMut<StationInventories>,
    mut commands: Commands,
    mut riders: Query<(Entity, &mut Position, &mut Ride), With<Scooter>>,
) {
    for (entity, mut position, mut ride) in &mut riders {
        let Some(next) = ride.0.pop_front() else {
            // A present ride is non-empty by invariant.
            debug_assert!(false, "scooter {entity:?} carries an empty ride");
            commands.entity(entity).remove::<Ride>();
            continue;
        };
        position.0 = next;
        if ride.0.is_empty() {
            // Arrived. Rides are built from hub→station paths, so the final
            // node must be a station.
            match topology.station_index(next) {
                Some(station) => stations.deposit(station, 1),
                None => debug_assert!(false, "ride ended off-station at {next:?}"),
            }
            commands.entity(entity).remove::<Ride>();
        }
    }
}
