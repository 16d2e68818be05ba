//! Experiment driver for the scooter rebalancing simulation: parameter sets,
//! parallel policy sweeps, and persistence of results.

pub mod export;
pub mod metrics;
pub mod parameters;
pub mod runner;
