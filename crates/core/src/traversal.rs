//! Graph traversal algorithms (BFS, DFS).
//!
//! Both traversals follow each node's neighbor list in insertion order, so
//! the visit order is fully determined by the order edges were added. Each
//! call owns its visited set; nothing carries over between calls.
//!
//! A start node that was never registered has no neighbors, so traversing
//! from it yields just that name.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Which traversal policy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// Level order, queue based
    BreadthFirst,
    /// Pre-order, stack based
    DepthFirst,
}

impl Traversal {
    pub fn run(self, graph: &Graph, start: &str) -> Vec<String> {
        match self {
            Traversal::BreadthFirst => breadth_first(graph, start),
            Traversal::DepthFirst => depth_first(graph, start),
        }
    }

    /// Short label used in output ("BFS" / "DFS")
    pub fn label(self) -> &'static str {
        match self {
            Traversal::BreadthFirst => "BFS",
            Traversal::DepthFirst => "DFS",
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Traversal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Traversal::BreadthFirst),
            "dfs" | "depth-first" => Ok(Traversal::DepthFirst),
            other => Err(format!("unknown traversal '{}', expected bfs or dfs", other)),
        }
    }
}

/// Breadth-first visit order from `start`
///
/// Every node reachable from `start` appears exactly once, in first-visited
/// order. Same-level ties follow neighbor insertion order.
pub fn breadth_first(graph: &Graph, start: &str) -> Vec<String> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        order.push(current.to_string());

        for neighbor in graph.neighbors(current) {
            if visited.insert(neighbor.id.as_str()) {
                queue.push_back(neighbor.id.as_str());
            }
        }
    }

    tracing::debug!(start = %start, visited = order.len(), "bfs");
    order
}

/// Depth-first pre-order from `start`
///
/// A node's first unvisited neighbor is explored completely before the next
/// neighbor is considered. Uses an explicit stack of `(node, next neighbor)`
/// frames so deep graphs cannot overflow the call stack.
pub fn depth_first(graph: &Graph, start: &str) -> Vec<String> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    let mut stack: Vec<(&str, usize)> = Vec::new();

    visited.insert(start);
    order.push(start.to_string());
    stack.push((start, 0));

    while let Some((current, next)) = stack.last_mut() {
        let neighbors = graph.neighbors(*current);
        let Some(neighbor) = neighbors.get(*next) else {
            stack.pop();
            continue;
        };
        *next += 1;

        let id = neighbor.id.as_str();
        if visited.insert(id) {
            order.push(id.to_string());
            stack.push((id, 0));
        }
    }

    tracing::debug!(start = %start, visited = order.len(), "dfs");
    order
}
