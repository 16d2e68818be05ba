//! Turn clock: the discrete time source for the simulation.
//!
//! One turn is one full pass over the simulation schedule. The clock is
//! advanced by the runner, outside systems, so every system within a pass
//! observes the same turn number.

use bevy_ecs::prelude::Resource;

/// Current simulation turn. Starts at 0.
#[derive(Debug, Default, Resource)]
pub struct TurnClock {
    now: u64,
}

impl TurnClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move to the next turn. Called once per schedule pass by the runner.
    pub fn advance(&mut self) {
        self.now += 1;
    }
}

/// Exclusive upper bound on turns. When present, the runner refuses to start
/// a turn at or past this value, so a run configured for `n` turns executes
/// exactly `n` schedule passes.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTurn(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero_and_advances_by_one() {
        let mut clock = TurnClock::default();
        assert_eq!(clock.now(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), 2);
    }
}
