#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use scooter_core::runner::{run_turn, run_turns, simulation_schedule};

/// Helper that owns a reusable `Schedule` so tests can step the simulation
/// turn by turn.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    pub fn new() -> Self {
        Self {
            schedule: simulation_schedule(),
        }
    }

    /// Run a single turn (returns `true` if a turn was executed).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_turn(world, &mut self.schedule)
    }

    /// Run up to `turns` turns, returning the number executed.
    pub fn run(&mut self, world: &mut World, turns: u64) -> u64 {
        run_turns(world, &mut self.schedule, turns)
    }
}
