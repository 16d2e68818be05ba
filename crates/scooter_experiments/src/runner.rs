//! Parallel simulation execution using rayon.

use bevy_ecs::prelude::World;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use scooter_core::runner::{run_turns, simulation_schedule};
use scooter_core::scenario::build_scenario;

use crate::metrics::{extract_summary, SimulationSummary};
use crate::parameters::ParameterSet;

/// Run one parameter set to completion in a fresh world.
pub fn run_single_simulation(param_set: &ParameterSet) -> Result<SimulationSummary, String> {
    let mut world = World::new();
    build_scenario(&mut world, param_set.scenario_params()).map_err(|e| e.to_string())?;

    let mut schedule = simulation_schedule();
    let executed = run_turns(&mut world, &mut schedule, param_set.turns);

    Ok(extract_summary(&mut world, executed))
}

/// Run every parameter set, worlds in parallel, with a progress bar. Panics
/// on an invalid set: sweeps are validated configurations by construction.
pub fn run_parameter_sweep(
    param_sets: &[ParameterSet],
) -> Vec<(ParameterSet, SimulationSummary)> {
    let progress = ProgressBar::new(param_sets.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} runs {msg}")
            .expect("progress template is valid"),
    );

    let results: Vec<(ParameterSet, SimulationSummary)> = param_sets
        .par_iter()
        .map(|param_set| {
            let summary = run_single_simulation(param_set)
                .expect("sweep parameter sets should build and run");
            progress.inc(1);
            (param_set.clone(), summary)
        })
        .collect();

    progress.finish_and_clear();
    results
}
