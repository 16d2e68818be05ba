//! Combined policy: convex blend of the aging and greedy scores.

use crate::dispatch::aging::aging_scores;
use crate::dispatch::algorithm::{best_scoring, DispatchContext, DispatchPolicy, TargetChoice};
use crate::dispatch::greedy::greedy_scores;
use crate::network::NodeId;

const DEFAULT_AGING_WEIGHT: f64 = 0.7;

/// Blends per-station scores as
/// `aging_weight × aging + (1 − aging_weight) × greedy`.
pub struct CombinedPolicy {
    aging_weight: f64,
}

impl CombinedPolicy {
    pub fn new(aging_weight: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&aging_weight));
        Self { aging_weight }
    }
}

impl Default for CombinedPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_AGING_WEIGHT)
    }
}

impl DispatchPolicy for CombinedPolicy {
    fn select_target(
        &self,
        truck_pos: NodeId,
        cargo: u32,
        inventory: &[u32],
        ctx: &DispatchContext<'_>,
    ) -> TargetChoice {
        let aging = aging_scores(inventory, ctx.aging);
        let greedy = greedy_scores(truck_pos, cargo, inventory, ctx);
        best_scoring(
            aging
                .into_iter()
                .zip(greedy)
                .map(|(a, g)| a * self.aging_weight + g * (1.0 - self.aging_weight)),
        )
    }
}
