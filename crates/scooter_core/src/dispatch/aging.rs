//! Aging policy: favor stations starved of truck attention.

use bevy_ecs::prelude::Resource;
use rand::Rng;

use crate::dispatch::algorithm::{best_scoring, DispatchContext, DispatchPolicy, TargetChoice};
use crate::network::NodeId;

/// Per-station neglect state consumed by the aging score.
///
/// `turns_without_visit` starts at 1 and is aged once per turn, after truck
/// movement, for every station — including one visited that same turn, whose
/// counter therefore reads 1 (not 0) on the next planning pass. That
/// off-by-one freshness is part of the scoring semantics.
#[derive(Debug, Resource)]
pub struct StationAging {
    turns_without_visit: Vec<u32>,
    idle_weight: Vec<f64>,
}

impl StationAging {
    /// Draw the fixed per-station idle weights, one per station, uniformly
    /// from `0.01..=0.30`.
    pub fn new<R: Rng>(station_count: usize, rng: &mut R) -> Self {
        let idle_weight = (0..station_count)
            .map(|_| f64::from(rng.gen_range(1..=30)) / 100.0)
            .collect();
        Self {
            turns_without_visit: vec![1; station_count],
            idle_weight,
        }
    }

    /// Fixture constructor with explicit state.
    pub fn with_state(turns_without_visit: Vec<u32>, idle_weight: Vec<f64>) -> Self {
        assert_eq!(turns_without_visit.len(), idle_weight.len());
        Self {
            turns_without_visit,
            idle_weight,
        }
    }

    pub fn station_count(&self) -> usize {
        self.turns_without_visit.len()
    }

    pub fn turns_without_visit(&self, station: usize) -> u32 {
        self.turns_without_visit[station]
    }

    pub fn idle_weight(&self, station: usize) -> f64 {
        self.idle_weight[station]
    }

    /// A truck serviced this station: reset its neglect counter.
    pub fn record_visit(&mut self, station: usize) {
        self.turns_without_visit[station] = 0;
    }

    /// End-of-turn aging pass, applied to every station unconditionally.
    pub fn age_all(&mut self) {
        for turns in &mut self.turns_without_visit {
            *turns += 1;
        }
    }
}

/// Per-station aging scores: `inventory × turns_without_visit × idle_weight`.
/// Distance-blind by design; a far, neglected, historically idle station
/// outranks a near one.
pub fn aging_scores(inventory: &[u32], aging: &StationAging) -> Vec<f64> {
    inventory
        .iter()
        .enumerate()
        .map(|(station, &level)| {
            f64::from(level)
                * f64::from(aging.turns_without_visit(station))
                * aging.idle_weight(station)
        })
        .collect()
}

pub struct AgingPolicy;

impl DispatchPolicy for AgingPolicy {
    fn select_target(
        &self,
        _truck_pos: NodeId,
        _cargo: u32,
        inventory: &[u32],
        ctx: &DispatchContext<'_>,
    ) -> TargetChoice {
        best_scoring(aging_scores(inventory, ctx.aging))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::GridRoadNetwork;
    use crate::topology::StationTopology;

    #[test]
    fn prefers_neglected_station_over_stocked_fresh_one() {
        let grid = GridRoadNetwork::new(4, 4);
        let topology =
            StationTopology::new(&grid, NodeId(0), &[NodeId(3), NodeId(15)]).expect("topology");
        let aging = StationAging::with_state(vec![1, 20], vec![0.2, 0.2]);
        let ctx = DispatchContext {
            network: &grid,
            topology: &topology,
            aging: &aging,
            capacity: 10,
        };

        // Station 0 is fuller, but station 1 has gone unvisited 20x longer.
        let choice = AgingPolicy.select_target(NodeId(0), 0, &[6, 3], &ctx);
        assert_eq!(choice.station, 1);
        assert_eq!(choice.score, 3.0 * 20.0 * 0.2);
    }

    #[test]
    fn visit_then_age_leaves_counter_at_one() {
        let mut aging = StationAging::with_state(vec![7, 7], vec![0.1, 0.1]);
        aging.record_visit(0);
        aging.age_all();
        assert_eq!(aging.turns_without_visit(0), 1);
        assert_eq!(aging.turns_without_visit(1), 8);
    }
}
