//! Persistence of sweep results: CSV summaries, per-turn metrics CSV, and a
//! JSON manifest of the parameter sets behind them.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use serde::Serialize;

use scooter_core::telemetry::MetricsLog;

use crate::metrics::SimulationSummary;
use crate::parameters::ParameterSet;

/// One CSV row per run: the identifying parameters joined with the summary.
/// Kept flat by hand — the csv writer cannot serialize nested structures.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    experiment_id: &'a str,
    run_id: u64,
    policy: &'static str,
    seed: u64,
    turns_run: u64,
    customers_served: u64,
    customers_dropped: u64,
    avg_wait_time: f64,
    under_utilization: f64,
    truck_utilization: f64,
    scooters_picked: u64,
    distance_travelled: u64,
    final_hub_level: u32,
    final_station_total: u32,
}

/// Write one summary row per completed run.
pub fn write_summaries_csv<P: AsRef<Path>>(
    path: P,
    results: &[(ParameterSet, SimulationSummary)],
) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for (params, summary) in results {
        writer.serialize(SummaryRow {
            experiment_id: &params.experiment_id,
            run_id: params.run_id,
            policy: params.policy.as_str(),
            seed: params.seed,
            turns_run: summary.turns_run,
            customers_served: summary.customers_served,
            customers_dropped: summary.customers_dropped,
            avg_wait_time: summary.avg_wait_time,
            under_utilization: summary.under_utilization,
            truck_utilization: summary.truck_utilization,
            scooters_picked: summary.scooters_picked,
            distance_travelled: summary.distance_travelled,
            final_hub_level: summary.final_hub_level,
            final_station_total: summary.final_station_total,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a run's full per-turn metrics log, one row per turn, preserving the
/// documented column order.
pub fn write_metrics_rows_csv<P: AsRef<Path>>(
    path: P,
    log: &MetricsLog,
) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in &log.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Archive the parameter sets of a sweep next to its results.
pub fn write_parameter_manifest_json<P: AsRef<Path>>(
    path: P,
    param_sets: &[ParameterSet],
) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, param_sets)?;
    Ok(())
}
