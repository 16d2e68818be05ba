//! Run the default 200-scooter / 8-truck scenario for 150 turns and print
//! the per-turn metrics tail.
//!
//! Run with: cargo run -p scooter_core --example scenario_run

use bevy_ecs::prelude::World;
use scooter_core::dispatch::DispatchPolicyKind;
use scooter_core::inventory::{HubInventory, StationInventories};
use scooter_core::runner::{run_turns, simulation_schedule};
use scooter_core::scenario::{build_scenario, ScenarioParams};
use scooter_core::telemetry::MetricsLog;

fn main() {
    const TURNS: u64 = 150;

    let mut world = World::new();
    build_scenario(
        &mut world,
        ScenarioParams::default()
            .with_seed(123)
            .with_policy(DispatchPolicyKind::Combined)
            .with_end_turn(TURNS),
    )
    .expect("default scenario should build");

    let mut schedule = simulation_schedule();
    let executed = run_turns(&mut world, &mut schedule, TURNS);

    let log = world.resource::<MetricsLog>();
    let hub = world.resource::<HubInventory>();
    let stations = world.resource::<StationInventories>();

    println!("--- Scenario run (combined policy, seed 123, {executed} turns) ---");
    println!(
        "Final inventory: hub {} / stations {:?}",
        hub.level(),
        stations.snapshot()
    );

    println!("\nLast 10 metrics rows (avg_wait, dropped, under_util, truck_util):");
    for row in log.rows.iter().rev().take(10).rev() {
        println!(
            "  turn {:>3}  {:>7.3}  {:>6}  {:>6.4}  {:>6.4}",
            row.turn,
            row.avg_wait_time,
            row.customers_dropped,
            row.under_utilization,
            row.truck_utilization,
        );
    }
}
