//! Graph data structures for the road network
//!
//! The graph is an undirected, weighted adjacency list keyed by location
//! name. Neighbor lists keep insertion order because traversal tie-breaking
//! depends on it, which is why the adjacency is stored here rather than in a
//! `petgraph` graph (whose neighbor iteration runs newest-first). A
//! `petgraph` view is still available through [`Graph::to_petgraph`] for
//! rendering and for callers that want petgraph's algorithms.

use std::collections::HashMap;
use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traversal;

/// One entry in a node's neighbor list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Name of the adjacent location
    pub id: String,
    /// Road distance to it
    pub distance: u32,
}

/// An undirected, weighted connection as it was added
///
/// This is also the triple exchanged with the persistence and import
/// collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub origin: String,
    pub destination: String,
    pub distance: u32,
}

impl Edge {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, distance: u32) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            distance,
        }
    }
}

/// The road network
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// Maps node IDs to their slot in `names`/`adjacency` for O(1) lookups
    index: HashMap<String, usize>,
    /// Node IDs in registration order
    names: Vec<String>,
    /// Neighbor lists, parallel to `names`
    adjacency: Vec<Vec<Neighbor>>,
    /// Every accepted edge, in insertion order
    edges: Vec<Edge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node
    ///
    /// Registering a name twice has no effect.
    pub fn add_node(&mut self, id: &str) {
        if self.index.contains_key(id) {
            return;
        }
        self.index.insert(id.to_string(), self.names.len());
        self.names.push(id.to_string());
        self.adjacency.push(Vec::new());
    }

    /// Add an undirected edge between two registered nodes
    ///
    /// Appends `destination` to the origin's neighbor list and `origin` to the
    /// destination's. Repeating the call adds parallel entries; nothing is
    /// de-duplicated.
    ///
    /// # Errors
    /// Returns [`Error::InvalidReference`] naming the first endpoint that was
    /// never registered. The graph is not modified in that case.
    pub fn add_edge(&mut self, origin: &str, destination: &str, distance: u32) -> Result<()> {
        let (from, to) = match (self.index.get(origin), self.index.get(destination)) {
            (Some(&from), Some(&to)) => (from, to),
            (None, _) => return Err(self.reject(origin, destination)),
            (_, None) => return Err(self.reject(destination, origin)),
        };

        self.adjacency[from].push(Neighbor {
            id: destination.to_string(),
            distance,
        });
        self.adjacency[to].push(Neighbor {
            id: origin.to_string(),
            distance,
        });
        self.edges.push(Edge::new(origin, destination, distance));
        Ok(())
    }

    fn reject(&self, missing: &str, other: &str) -> Error {
        tracing::debug!(
            missing = %missing,
            other = %other,
            "Ignoring edge with unregistered endpoint"
        );
        Error::InvalidReference {
            node: missing.to_string(),
        }
    }

    /// Whether `id` is a registered node
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Neighbor list of `id`, in insertion order
    ///
    /// Unknown IDs have no neighbors.
    pub fn neighbors(&self, id: &str) -> &[Neighbor] {
        match self.index.get(id) {
            Some(&slot) => &self.adjacency[slot],
            None => &[],
        }
    }

    /// Node IDs in registration order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Accepted edges in insertion order, each listed once
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Get the number of accepted edges (parallel edges counted separately)
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Breadth-first visit order from `start`
    ///
    /// See [`traversal::breadth_first`].
    pub fn breadth_first(&self, start: &str) -> Vec<String> {
        traversal::breadth_first(self, start)
    }

    /// Depth-first pre-order from `start`
    ///
    /// See [`traversal::depth_first`].
    pub fn depth_first(&self, start: &str) -> Vec<String> {
        traversal::depth_first(self, start)
    }

    /// Export to a `petgraph` undirected graph
    ///
    /// Node indices follow registration order. Parallel edges collapse into a
    /// single petgraph edge carrying the most recently added distance.
    pub fn to_petgraph(&self) -> UnGraph<String, u32> {
        let mut out = UnGraph::with_capacity(self.names.len(), self.edges.len());
        let indices: Vec<NodeIndex> = self
            .names
            .iter()
            .map(|name| out.add_node(name.clone()))
            .collect();

        // Every stored edge has both endpoints registered
        for edge in &self.edges {
            let a = indices[self.index[&edge.origin]];
            let b = indices[self.index[&edge.destination]];
            out.update_edge(a, b, edge.distance);
        }
        out
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, neighbors) in self.names.iter().zip(&self.adjacency) {
            let entries: Vec<String> = neighbors
                .iter()
                .map(|n| format!("({}, {})", n.id, n.distance))
                .collect();
            writeln!(f, "{}: [{}]", name, entries.join(", "))?;
        }
        Ok(())
    }
}
