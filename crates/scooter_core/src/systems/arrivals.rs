//! Arrivals: a fixed batch of customers joins the hub queue each turn.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::TurnClock;
use crate::ecs::{CustomerRequest, HubQueue};
use crate::scenario::FleetConfig;

pub fn arrivals_system(
    clock: Res<TurnClock>,
    config: Res<FleetConfig>,
    mut queue: ResMut<HubQueue>,
) {
    let expires_at = clock.now() + config.wait_window;
    for _ in 0..config.arrival_rate {
        queue.0.push_back(CustomerRequest { expires_at });
    }
}
