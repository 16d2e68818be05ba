//! Utilization accounting: count the scooters that sat out this turn.
//!
//! Every scooter without an active ride counts, buffer stock parked at
//! stations included.

use bevy_ecs::prelude::{Query, ResMut, With, Without};

use crate::ecs::{Ride, Scooter};
use crate::telemetry::RideStats;

pub fn utilization_system(
    mut stats: ResMut<RideStats>,
    idle: Query<(), (With<Scooter>, Without<Ride>)>,
) {
    stats.idle_scooter_turns += idle.iter().count() as u64;
}
