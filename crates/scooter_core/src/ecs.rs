//! ECS components and queue state for the two agent kinds.
//!
//! Scooters and trucks are entities; their optional route state (`Ride`,
//! `TruckRoute`) is expressed as components that exist only while the agent
//! is moving, so `Without<Ride>` / `Without<TruckRoute>` queries select the
//! idle population directly.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Component, Entity, Resource};

use crate::network::NodeId;

/// Marker for scooter entities.
#[derive(Debug, Clone, Copy, Component)]
pub struct Scooter;

/// Current node of a scooter or truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Position(pub NodeId);

/// Remaining nodes of a scooter's ride, front = next hop. Present only while
/// the scooter is in transit, and non-empty for as long as it is present: a
/// ride that empties on arrival is removed in the same step.
#[derive(Debug, Clone, Component)]
pub struct Ride(pub VecDeque<NodeId>);

/// Scooter loaded onto a truck, tagged with the carrying truck's entity.
/// Carried scooters keep the position of the station they were collected
/// from until the truck unloads them at the hub; they are counted in the
/// truck's cargo, not in any site inventory, and are never assignable.
#[derive(Debug, Clone, Copy, Component)]
pub struct Carried(pub Entity);

/// A rebalancing truck. `cargo` is the number of scooters on board,
/// `0..=capacity`.
#[derive(Debug, Clone, Copy, Component)]
pub struct Truck {
    pub cargo: u32,
}

/// Stable planning order for trucks. Query iteration order is not guaranteed,
/// and planning must process trucks in a fixed sequence so that speculative
/// inventory reservations are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Component)]
pub struct TruckId(pub usize);

/// Remaining nodes of a truck's planned route, front = next hop. Present only
/// while a route is assigned; removed on arrival at the hub or a station.
#[derive(Debug, Clone, Component)]
pub struct TruckRoute(pub VecDeque<NodeId>);

/// One waiting customer. Carries only the turn at which the request expires;
/// the arrival turn is recoverable as `expires_at - wait_window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerRequest {
    pub expires_at: u64,
}

/// FIFO queue of customers waiting at the hub.
#[derive(Debug, Default, Resource)]
pub struct HubQueue(pub VecDeque<CustomerRequest>);

impl HubQueue {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
