//! Shared inventory counters: scooters parked at the hub and at each station.
//!
//! These are the single piece of state both cores mutate — the scooter side
//! during replenishment, arrivals and queue service, the truck side during
//! planning (speculatively, on a snapshot) and movement. All mutation goes
//! through deposit/withdraw so non-negativity is asserted in one place and a
//! release build can never silently swallow inventory.

use bevy_ecs::prelude::Resource;

/// Scooters parked at the hub.
#[derive(Debug, Resource)]
pub struct HubInventory {
    count: u32,
}

impl HubInventory {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    pub fn level(&self) -> u32 {
        self.count
    }

    pub fn deposit(&mut self, n: u32) {
        self.count += n;
    }

    pub fn withdraw(&mut self, n: u32) {
        debug_assert!(
            self.count >= n,
            "hub inventory underflow: {} - {}",
            self.count,
            n
        );
        self.count -= n;
    }
}

/// Scooters parked at each station, indexed by station index.
#[derive(Debug, Resource)]
pub struct StationInventories {
    counts: Vec<u32>,
}

impl StationInventories {
    pub fn new(station_count: usize) -> Self {
        Self {
            counts: vec![0; station_count],
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn level(&self, station: usize) -> u32 {
        self.counts[station]
    }

    pub fn deposit(&mut self, station: usize, n: u32) {
        self.counts[station] += n;
    }

    pub fn withdraw(&mut self, station: usize, n: u32) {
        debug_assert!(
            self.counts[station] >= n,
            "station {} inventory underflow: {} - {}",
            station,
            self.counts[station],
            n
        );
        self.counts[station] -= n;
    }

    /// Copy of the per-station levels, used as the speculative snapshot
    /// during truck planning.
    pub fn snapshot(&self) -> Vec<u32> {
        self.counts.clone()
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposits_and_withdrawals_balance() {
        let mut hub = HubInventory::new(10);
        hub.withdraw(4);
        hub.deposit(1);
        assert_eq!(hub.level(), 7);

        let mut stations = StationInventories::new(3);
        stations.deposit(1, 5);
        stations.withdraw(1, 2);
        assert_eq!(stations.level(1), 3);
        assert_eq!(stations.total(), 3);
        assert_eq!(stations.snapshot(), vec![0, 3, 0]);
    }

    #[test]
    #[should_panic(expected = "underflow")]
    #[cfg(debug_assertions)]
    fn station_withdraw_past_zero_panics_in_debug() {
        let mut stations = StationInventories::new(1);
        stations.withdraw(0, 1);
    }
}
