//! Rendering of the road network and traversal results
//!
//! Produces Graphviz DOT through `petgraph::dot`. A traversal order can be
//! highlighted: every pair of consecutive names in the order is drawn in red.
//! Consecutive names are not always adjacent (BFS jumps between siblings), so
//! pairs without a road between them get an extra dashed, unlabelled line.

use std::collections::{HashMap, HashSet};

use petgraph::dot::Dot;
use petgraph::graph::{EdgeIndex, EdgeReference, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::graph::Graph;

/// Consecutive pairs of a traversal order
pub fn path_segments(order: &[String]) -> Vec<(&str, &str)> {
    order
        .windows(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect()
}

/// Human readable numbered order, e.g. `1. X -> 2. Y -> 3. Z`
pub fn describe_order(order: &[String]) -> String {
    order
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Render `graph` as DOT, optionally highlighting a traversal order
pub fn render_dot(graph: &Graph, highlight: Option<&[String]>) -> String {
    let mut scene: UnGraph<String, String> = graph
        .to_petgraph()
        .map(|_, name| name.clone(), |_, distance| distance.to_string());

    let by_name: HashMap<String, NodeIndex> = scene
        .node_indices()
        .map(|idx| (scene[idx].clone(), idx))
        .collect();

    let mut on_path: HashSet<EdgeIndex> = HashSet::new();
    let mut jumps: HashSet<EdgeIndex> = HashSet::new();

    for (a, b) in highlight.map(path_segments).unwrap_or_default() {
        let (Some(&a), Some(&b)) = (by_name.get(a), by_name.get(b)) else {
            continue;
        };
        match scene.find_edge(a, b) {
            Some(edge) => {
                on_path.insert(edge);
            }
            None => {
                let edge = scene.add_edge(a, b, String::new());
                on_path.insert(edge);
                jumps.insert(edge);
            }
        }
    }

    let edge_attrs = |_: &UnGraph<String, String>, edge: EdgeReference<'_, String>| {
        if jumps.contains(&edge.id()) {
            "color = \"red\" penwidth = 2 style = \"dashed\" ".to_string()
        } else if on_path.contains(&edge.id()) {
            "color = \"red\" penwidth = 2 ".to_string()
        } else {
            String::new()
        }
    };
    let node_attrs = |_: &UnGraph<String, String>, _: (NodeIndex, &String)| {
        "style = \"filled\" fillcolor = \"lightblue\" ".to_string()
    };

    let dot = Dot::with_attr_getters(&scene, &[], &edge_attrs, &node_attrs);
    format!("{}", dot)
}
