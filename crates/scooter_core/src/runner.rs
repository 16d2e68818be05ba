//! Simulation runner: builds the per-turn schedule and advances the clock.
//!
//! Clock progression happens here, outside systems, so every system in one
//! pass observes the same turn number. The schedule is a single explicit
//! chain — the six-step intra-turn ordering is a semantic contract (planning
//! must see post-queue-service inventories, movement must run after
//! planning), not an optimization detail, so no two steps may be reordered
//! or parallelized against each other.

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs, Schedule};

use crate::clock::{SimulationEndTurn, TurnClock};
use crate::systems::{
    arrivals::arrivals_system,
    metrics_capture::{capture_metrics_system, capture_snapshot_system, should_capture_snapshot},
    queue_service::queue_service_system,
    replenishment::replenishment_system,
    transit::scooter_transit_system,
    truck_movement::truck_movement_system,
    truck_planning::truck_planning_system,
    utilization::utilization_system,
};

/// Builds the per-turn schedule. The explicit [apply_deferred] sync points
/// flush component insertions/removals (rides, truck routes) where a later
/// step must observe them within the same turn.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            replenishment_system,
            scooter_transit_system,
            // Ride completions must be visible to queue service's idle pool
            // and to the utilization count.
            apply_deferred,
            queue_service_system,
            arrivals_system,
            // Fresh ride assignments must not be counted as idle.
            apply_deferred,
            utilization_system,
            truck_planning_system,
            // New truck routes move on the same turn they are planned.
            apply_deferred,
            truck_movement_system,
            // Cleared routes settle before anything inspects the world.
            apply_deferred,
            capture_metrics_system,
            capture_snapshot_system.run_if(should_capture_snapshot),
        )
            .chain(),
    );
    schedule
}

/// Runs one turn: a full schedule pass, then the clock advances. Returns
/// `false` without running anything when [SimulationEndTurn] is present and
/// already reached, so a bounded run executes exactly its configured number
/// of turns.
pub fn run_turn(world: &mut World, schedule: &mut Schedule) -> bool {
    let now = world.resource::<TurnClock>().now();
    if let Some(end) = world.get_resource::<SimulationEndTurn>() {
        if now >= end.0 {
            return false;
        }
    }

    schedule.run(world);
    world.resource_mut::<TurnClock>().advance();
    true
}

/// Runs one turn and invokes `hook` after the schedule completes, before the
/// clock advances, with the turn that just executed.
pub fn run_turn_with_hook<F>(world: &mut World, schedule: &mut Schedule, mut hook: F) -> bool
where
    F: FnMut(&World, u64),
{
    let now = world.resource::<TurnClock>().now();
    if let Some(end) = world.get_resource::<SimulationEndTurn>() {
        if now >= end.0 {
            return false;
        }
    }

    schedule.run(world);
    hook(world, now);
    world.resource_mut::<TurnClock>().advance();
    true
}

/// Runs up to `turns` turns, stopping early at [SimulationEndTurn]. Returns
/// the number of turns executed.
pub fn run_turns(world: &mut World, schedule: &mut Schedule, turns: u64) -> u64 {
    let mut executed = 0;
    while executed < turns && run_turn(world, schedule) {
        executed += 1;
    }
    executed
}

/// Runs up to `turns` turns and invokes `hook` after each one.
pub fn run_turns_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    turns: u64,
    mut hook: F,
) -> u64
where
    F: FnMut(&World, u64),
{
    let mut executed = 0;
    while executed < turns && run_turn_with_hook(world, schedule, &mut hook) {
        executed += 1;
    }
    executed
}
