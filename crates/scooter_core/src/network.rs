//! Pluggable road networks: trait abstraction over the shortest-path oracle.
//!
//! Road-network construction and shortest-path search are external concerns;
//! the simulation consumes them through [`RoadNetwork`]. Two backends are
//! built in, selectable via [`NetworkKind`]:
//!
//! - **`GridRoadNetwork`**: a unit-cost 4-neighbor grid. Zero setup, used by
//!   default scenarios, tests, and benches.
//! - **`AdjacencyRoadNetwork`**: explicit node/edge lists, e.g. extracted
//!   from real map data. With the `precomputed` feature it loads from a
//!   bincode file on disk.
//!
//! The selected backend is stored as a `Box<dyn RoadNetwork>` ECS resource,
//! constructed from `NetworkKind` during scenario building, and is usually
//! wrapped in [`CachedRoadNetwork`] so repeated path queries hit an LRU.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use bevy_ecs::prelude::Resource;
use lru::LruCache;
use pathfinding::prelude::bfs;
use serde::{Deserialize, Serialize};

/// Opaque node identifier supplied by the road network.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

/// A network node: identifier plus 2D display coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Trait for road-network backends. Implementations must be `Send + Sync` so
/// the network can be stored as a shared ECS resource.
pub trait RoadNetwork: Send + Sync {
    /// Look up a node by id. Returns `None` for ids outside the network.
    fn node(&self, id: NodeId) -> Option<Node>;

    /// All node ids, in a stable order (used for seeded placement draws).
    fn node_ids(&self) -> Vec<NodeId>;

    /// Shortest path from `from` to `to`, inclusive of both endpoints.
    /// The first element is always `from`; callers drop it before use.
    /// Returns `None` if either node is unknown or no path exists.
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>>;

    /// Node count of the shortest path, source included. This is the pure
    /// distance metric used by the greedy dispatch score.
    fn path_len(&self, from: NodeId, to: NodeId) -> Option<usize> {
        self.shortest_path(from, to).map(|path| path.len())
    }
}

/// ECS resource wrapping a boxed road network.
#[derive(Resource)]
pub struct RoadNetworkResource(pub Box<dyn RoadNetwork>);

impl RoadNetworkResource {
    pub fn new(network: Box<dyn RoadNetwork>) -> Self {
        Self(network)
    }
}

impl std::ops::Deref for RoadNetworkResource {
    type Target = dyn RoadNetwork;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Which road-network backend to use. Serializes into experiment parameter
/// sets alongside the rest of the scenario configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum NetworkKind {
    /// Unit-cost 4-neighbor grid of `width × height` nodes.
    Grid { width: u32, height: u32 },
    /// Adjacency network loaded from a bincode file at startup.
    #[cfg(feature = "precomputed")]
    Precomputed { path: String },
}

impl Default for NetworkKind {
    fn default() -> Self {
        NetworkKind::Grid {
            width: 24,
            height: 24,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid backend (always available)
// ---------------------------------------------------------------------------

/// Unit-cost grid: node `(col, row)` has id `row * width + col` and
/// coordinate `(col, row)`. Edges connect 4-neighbors.
#[derive(Debug, Clone)]
pub struct GridRoadNetwork {
    width: u32,
    height: u32,
}

impl GridRoadNetwork {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self { width, height }
    }

    fn contains(&self, id: NodeId) -> bool {
        id.0 < u64::from(self.width) * u64::from(self.height)
    }

    fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let w = u64::from(self.width);
        let col = id.0 % w;
        let row = id.0 / w;
        let mut out = Vec::with_capacity(4);
        if col > 0 {
            out.push(NodeId(id.0 - 1));
        }
        if col + 1 < w {
            out.push(NodeId(id.0 + 1));
        }
        if row > 0 {
            out.push(NodeId(id.0 - w));
        }
        if row + 1 < u64::from(self.height) {
            out.push(NodeId(id.0 + w));
        }
        out
    }
}

impl RoadNetwork for GridRoadNetwork {
    fn node(&self, id: NodeId) -> Option<Node> {
        if !self.contains(id) {
            return None;
        }
        let w = u64::from(self.width);
        Some(Node {
            id,
            x: (id.0 % w) as f64,
            y: (id.0 / w) as f64,
        })
    }

    fn node_ids(&self) -> Vec<NodeId> {
        (0..u64::from(self.width) * u64::from(self.height))
            .map(NodeId)
            .collect()
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        bfs(&from, |id| self.neighbors(*id), |id| *id == to)
    }
}

// ---------------------------------------------------------------------------
// Adjacency backend
// ---------------------------------------------------------------------------

/// Explicit node/edge network, e.g. distilled from real map data. Edges are
/// stored directed; undirected maps list each edge both ways.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjacencyRoadNetwork {
    nodes: Vec<Node>,
    edges: HashMap<NodeId, Vec<NodeId>>,
    #[serde(skip)]
    by_id: HashMap<NodeId, usize>,
}

impl AdjacencyRoadNetwork {
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<(NodeId, NodeId)>) -> Self {
        let by_id = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id, i))
            .collect();
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for (from, to) in edges {
            adjacency.entry(from).or_default().push(to);
        }
        Self {
            nodes,
            edges: adjacency,
            by_id,
        }
    }

    /// Load from a bincode-serialized file written by an external
    /// network-construction tool.
    #[cfg(feature = "precomputed")]
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read(path)?;
        let mut network: AdjacencyRoadNetwork = bincode::deserialize(&data)?;
        network.by_id = network
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id, i))
            .collect();
        Ok(network)
    }

    /// Serialize the network to a file.
    #[cfg(feature = "precomputed")]
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let data = bincode::serialize(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl RoadNetwork for AdjacencyRoadNetwork {
    fn node(&self, id: NodeId) -> Option<Node> {
        self.by_id.get(&id).map(|&i| self.nodes[i])
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|node| node.id).collect()
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        if !self.by_id.contains_key(&from) || !self.by_id.contains_key(&to) {
            return None;
        }
        bfs(
            &from,
            |id| self.edges.get(id).cloned().unwrap_or_default(),
            |id| *id == to,
        )
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

/// LRU-cached wrapper around any [`RoadNetwork`].
///
/// Cache key is `(from, to)` (directional, since paths are consumed
/// front-first and reversing is not free). Node lookups pass through.
pub struct CachedRoadNetwork {
    inner: Box<dyn RoadNetwork>,
    cache: Mutex<LruCache<(NodeId, NodeId), Option<Vec<NodeId>>>>,
}

impl CachedRoadNetwork {
    pub fn new(inner: Box<dyn RoadNetwork>, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).expect("cache capacity must be > 0"),
            )),
        }
    }
}

impl RoadNetwork for CachedRoadNetwork {
    fn node(&self, id: NodeId) -> Option<Node> {
        self.inner.node(id)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.inner.node_ids()
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        let key = (from, to);
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            // Mutex poisoned: compute without caching.
            Err(_) => return self.inner.shortest_path(from, to),
        };
        cache
            .get_or_insert(key, || self.inner.shortest_path(from, to))
            .clone()
    }
}

// ---------------------------------------------------------------------------
// Factory: build a network from NetworkKind
// ---------------------------------------------------------------------------

/// Default path-cache capacity. Hub paths and truck routes revisit the same
/// origin/destination pairs every few turns, so a modest cache suffices.
const DEFAULT_PATH_CACHE_CAPACITY: usize = 10_000;

/// Construct a boxed [`RoadNetwork`] from a [`NetworkKind`] descriptor,
/// wrapped in an LRU path cache.
pub fn build_road_network(kind: &NetworkKind) -> Box<dyn RoadNetwork> {
    match kind {
        NetworkKind::Grid { width, height } => Box::new(CachedRoadNetwork::new(
            Box::new(GridRoadNetwork::new(*width, *height)),
            DEFAULT_PATH_CACHE_CAPACITY,
        )),

        #[cfg(feature = "precomputed")]
        NetworkKind::Precomputed { path } => match AdjacencyRoadNetwork::from_file(path) {
            Ok(network) => Box::new(CachedRoadNetwork::new(
                Box::new(network),
                DEFAULT_PATH_CACHE_CAPACITY,
            )),
            Err(e) => {
                eprintln!(
                    "WARNING: failed to load road network from '{}': {}. Falling back to the default grid.",
                    path, e
                );
                build_road_network(&NetworkKind::default())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_path_starts_at_source_and_has_manhattan_length() {
        let grid = GridRoadNetwork::new(5, 5);
        let from = NodeId(0);
        let to = NodeId(12); // (2, 2)
        let path = grid.shortest_path(from, to).expect("path");
        assert_eq!(path[0], from);
        assert_eq!(*path.last().expect("non-empty"), to);
        // Manhattan distance 4, plus the source node.
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn grid_rejects_unknown_nodes() {
        let grid = GridRoadNetwork::new(3, 3);
        assert!(grid.node(NodeId(9)).is_none());
        assert!(grid.shortest_path(NodeId(0), NodeId(9)).is_none());
    }

    #[test]
    fn adjacency_respects_edge_direction() {
        let nodes = vec![
            Node { id: NodeId(1), x: 0.0, y: 0.0 },
            Node { id: NodeId(2), x: 1.0, y: 0.0 },
        ];
        let network = AdjacencyRoadNetwork::from_parts(nodes, vec![(NodeId(1), NodeId(2))]);
        assert_eq!(
            network.shortest_path(NodeId(1), NodeId(2)),
            Some(vec![NodeId(1), NodeId(2)])
        );
        assert!(network.shortest_path(NodeId(2), NodeId(1)).is_none());
    }

    #[test]
    fn cached_network_returns_same_paths_as_inner() {
        let cached = CachedRoadNetwork::new(Box::new(GridRoadNetwork::new(4, 4)), 16);
        let direct = GridRoadNetwork::new(4, 4);
        let (from, to) = (NodeId(0), NodeId(15));
        assert_eq!(cached.shortest_path(from, to), direct.shortest_path(from, to));
        // Second query is served from cache and must be identical.
        assert_eq!(cached.shortest_path(from, to), direct.shortest_path(from, to));
        assert_eq!(cached.path_len(from, to), Some(7));
    }
}
