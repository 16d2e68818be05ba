//! Station topology: the hub, the fixed station set, and the precomputed
//! hub→station paths.
//!
//! Built once at scenario construction and immutable afterwards. The hub
//! paths already have their first node (the hub itself) dropped, so they can
//! be handed to a scooter as a ride verbatim.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;
use thiserror::Error;

use crate::network::{Node, NodeId, RoadNetwork};

/// Errors raised while wiring hub and stations into the road network.
/// These are construction-time failures; nothing is spawned on error.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("node {0:?} is not part of the road network")]
    UnknownNode(NodeId),
    #[error("station {0:?} is listed more than once")]
    DuplicateStation(NodeId),
    #[error("the hub node {0:?} cannot also be a station")]
    HubIsStation(NodeId),
    #[error("no path from hub {hub:?} to station {station:?}")]
    UnreachableStation { hub: NodeId, station: NodeId },
}

#[derive(Debug, Clone, Resource)]
pub struct StationTopology {
    hub: Node,
    stations: Vec<Node>,
    by_node: HashMap<NodeId, usize>,
    hub_paths: Vec<Vec<NodeId>>,
}

impl StationTopology {
    /// Resolve hub and station nodes against the network and precompute the
    /// hub→station path for each station.
    pub fn new(
        network: &dyn RoadNetwork,
        hub: NodeId,
        stations: &[NodeId],
    ) -> Result<Self, TopologyError> {
        let hub_node = network.node(hub).ok_or(TopologyError::UnknownNode(hub))?;

        let mut by_node = HashMap::with_capacity(stations.len());
        let mut station_nodes = Vec::with_capacity(stations.len());
        let mut hub_paths = Vec::with_capacity(stations.len());
        for (index, &station) in stations.iter().enumerate() {
            if station == hub {
                return Err(TopologyError::HubIsStation(station));
            }
            let node = network
                .node(station)
                .ok_or(TopologyError::UnknownNode(station))?;
            if by_node.insert(station, index).is_some() {
                return Err(TopologyError::DuplicateStation(station));
            }
            let mut path = network
                .shortest_path(hub, station)
                .ok_or(TopologyError::UnreachableStation { hub, station })?;
            // First element is the hub itself; rides start from the next hop.
            path.remove(0);
            hub_paths.push(path);
            station_nodes.push(node);
        }

        Ok(Self {
            hub: hub_node,
            stations: station_nodes,
            by_node,
            hub_paths,
        })
    }

    pub fn hub(&self) -> Node {
        self.hub
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn stations(&self) -> &[Node] {
        &self.stations
    }

    pub fn station_node(&self, index: usize) -> Node {
        self.stations[index]
    }

    /// Station index for a node, or `None` if the node is not a station.
    pub fn station_index(&self, node: NodeId) -> Option<usize> {
        self.by_node.get(&node).copied()
    }

    pub fn is_hub(&self, node: NodeId) -> bool {
        self.hub.id == node
    }

    /// Precomputed hub→station path with the hub node already dropped.
    /// Non-empty by construction (the hub is never a station).
    pub fn hub_path(&self, index: usize) -> &[NodeId] {
        &self.hub_paths[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::GridRoadNetwork;

    #[test]
    fn builds_paths_with_hub_dropped() {
        let grid = GridRoadNetwork::new(4, 4);
        let topology =
            StationTopology::new(&grid, NodeId(0), &[NodeId(3), NodeId(12)]).expect("topology");

        assert_eq!(topology.station_count(), 2);
        assert_eq!(topology.station_index(NodeId(3)), Some(0));
        assert_eq!(topology.station_index(NodeId(12)), Some(1));
        assert_eq!(topology.station_index(NodeId(5)), None);
        assert!(topology.is_hub(NodeId(0)));

        let path = topology.hub_path(0);
        assert_eq!(path.first(), Some(&NodeId(1)), "hub node must be dropped");
        assert_eq!(path.last(), Some(&NodeId(3)));
    }

    #[test]
    fn rejects_hub_as_station() {
        let grid = GridRoadNetwork::new(3, 3);
        let err = StationTopology::new(&grid, NodeId(0), &[NodeId(0)]).unwrap_err();
        assert!(matches!(err, TopologyError::HubIsStation(NodeId(0))));
    }

    #[test]
    fn rejects_duplicate_and_unknown_stations() {
        let grid = GridRoadNetwork::new(3, 3);
        let err = StationTopology::new(&grid, NodeId(0), &[NodeId(4), NodeId(4)]).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateStation(NodeId(4))));

        let err = StationTopology::new(&grid, NodeId(0), &[NodeId(99)]).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownNode(NodeId(99))));
    }

    #[test]
    fn rejects_unreachable_station() {
        use crate::network::AdjacencyRoadNetwork;

        let nodes = vec![
            Node { id: NodeId(1), x: 0.0, y: 0.0 },
            Node { id: NodeId(2), x: 1.0, y: 0.0 },
        ];
        // No edges at all: station 2 is unreachable from hub 1.
        let network = AdjacencyRoadNetwork::from_parts(nodes, vec![]);
        let err = StationTopology::new(&network, NodeId(1), &[NodeId(2)]).unwrap_err();
        assert!(matches!(err, TopologyError::UnreachableStation { .. }));
    }
}
