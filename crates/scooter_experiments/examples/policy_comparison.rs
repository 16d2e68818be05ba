//! Compare the three dispatch policies over a handful of seeds and persist
//! the sweep results.
//!
//! Run with: cargo run -p scooter_experiments --example policy_comparison

use scooter_experiments::export::{write_parameter_manifest_json, write_summaries_csv};
use scooter_experiments::parameters::{policy_sweep, ParameterSet};
use scooter_experiments::runner::run_parameter_sweep;

fn main() {
    let base = ParameterSet {
        experiment_id: "policy-comparison".to_string(),
        ..Default::default()
    };
    let sets = policy_sweep(&base, &[11, 23, 47]);

    println!("Running {} simulations...", sets.len());
    let results = run_parameter_sweep(&sets);

    println!(
        "\n{:<10} {:>6} {:>10} {:>10} {:>12} {:>12}",
        "policy", "seed", "served", "dropped", "avg_wait", "truck_util"
    );
    for (params, summary) in &results {
        println!(
            "{:<10} {:>6} {:>10} {:>10} {:>12.3} {:>12.4}",
            params.policy.as_str(),
            params.seed,
            summary.customers_served,
            summary.customers_dropped,
            summary.avg_wait_time,
            summary.truck_utilization,
        );
    }

    let out_dir = std::env::temp_dir();
    let csv_path = out_dir.join("policy_comparison_summaries.csv");
    let manifest_path = out_dir.join("policy_comparison_manifest.json");
    write_summaries_csv(&csv_path, &results).expect("summary export should succeed");
    write_parameter_manifest_json(&manifest_path, &sets).expect("manifest export should succeed");
    println!("\nWrote {} and {}", csv_path.display(), manifest_path.display());
}
