use crate::dispatch::StationAging;
use crate::network::{NodeId, RoadNetwork};
use crate::topology::StationTopology;

/// Read-only state every policy may consult when scoring stations.
///
/// The inventory snapshot is passed separately because it is *speculative*:
/// the planning pass decrements it as trucks commit, so two trucks planned in
/// the same turn never count the same scooters twice.
pub struct DispatchContext<'a> {
    pub network: &'a dyn RoadNetwork,
    pub topology: &'a StationTopology,
    pub aging: &'a StationAging,
    /// Per-truck cargo capacity.
    pub capacity: u32,
}

/// A policy's verdict: the winning station index and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetChoice {
    pub score: f64,
    pub station: usize,
}

/// Trait for scoring policies that pick the station a truck should service
/// next.
///
/// Implementations must be pure functions of their arguments: given the same
/// truck position, cargo, inventory snapshot, and context, they return the
/// same choice. All shared mutable state (visit ages, idle weights) reaches
/// the policy through [`DispatchContext`], never through `&mut self`.
///
/// Ties are resolved by iteration order: the first station reaching the top
/// score wins (see [`best_scoring`]).
pub trait DispatchPolicy: Send + Sync {
    /// Score every station and return the best one for this truck.
    ///
    /// * `truck_pos` - the truck's current node
    /// * `cargo` - scooters already on board (`0..=ctx.capacity`)
    /// * `inventory` - speculative per-station scooter counts
    fn select_target(
        &self,
        truck_pos: NodeId,
        cargo: u32,
        inventory: &[u32],
        ctx: &DispatchContext<'_>,
    ) -> TargetChoice;
}

/// Pick the first strict maximum from a score sequence. Keeping the first
/// occurrence (not the last, as `Iterator::max_by` would) preserves the
/// stable-sort tie-break every policy promises.
pub fn best_scoring(scores: impl IntoIterator<Item = f64>) -> TargetChoice {
    let mut best = TargetChoice {
        score: f64::NEG_INFINITY,
        station: 0,
    };
    for (station, score) in scores.into_iter().enumerate() {
        if score > best.score {
            best = TargetChoice { score, station };
        }
    }
    best
}
