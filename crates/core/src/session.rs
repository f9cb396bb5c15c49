//! An owned road network bound to its persistence
//!
//! A [`Session`] is what a front end holds for its lifetime: it loads every
//! stored connection on open, and every connection it accepts afterwards
//! (typed in or imported) is written back through the same store.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph};
use crate::import::{self, ImportReport};
use crate::store::EdgeStore;
use crate::traversal::Traversal;

pub struct Session<S: EdgeStore> {
    graph: Graph,
    store: S,
}

impl<S: EdgeStore> Session<S> {
    /// Build the graph from everything `store` holds
    pub fn open(store: S) -> Result<Self> {
        let mut graph = Graph::new();
        let edges = store.load()?;
        for edge in &edges {
            register(&mut graph, edge)?;
        }
        tracing::info!(
            nodes = graph.node_count(),
            connections = edges.len(),
            "Loaded road network"
        );
        Ok(Self { graph, store })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add and persist one connection, registering both endpoints
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if either name is empty, or the store error if
    /// saving fails. Nothing is added or stored in either case.
    pub fn connect(&mut self, origin: &str, destination: &str, distance: u32) -> Result<Edge> {
        if origin.is_empty() || destination.is_empty() {
            return Err(Error::InvalidInput(
                "origin and destination must both be given".to_string(),
            ));
        }

        let edge = Edge::new(origin, destination, distance);
        self.store.save(&edge)?;
        register(&mut self.graph, &edge)?;
        tracing::debug!(
            origin = %origin,
            destination = %destination,
            distance,
            "Connection added"
        );
        Ok(edge)
    }

    /// Import CSV records, persisting each connection as it is applied
    ///
    /// If the reader or the store fails partway, the records applied so far
    /// stay in both the graph and the store, so a reopened session sees the
    /// same network.
    pub fn import<R: Read>(&mut self, reader: R) -> Result<ImportReport> {
        let store = &mut self.store;
        import::import_csv_with(&mut self.graph, reader, |edge| store.save(edge))
    }

    /// [`Session::import`] from a file
    pub fn import_path(&mut self, path: &Path) -> Result<ImportReport> {
        let file = std::fs::File::open(path)?;
        self.import(file)
    }

    /// Run a traversal from a registered node
    ///
    /// Unlike [`Graph::breadth_first`] and [`Graph::depth_first`], which
    /// accept any name, a session refuses to start from a location it has
    /// never seen.
    pub fn traverse(&self, traversal: Traversal, start: &str) -> Result<Vec<String>> {
        if !self.graph.contains(start) {
            return Err(Error::UnknownNode(start.to_string()));
        }
        Ok(traversal.run(&self.graph, start))
    }
}

fn register(graph: &mut Graph, edge: &Edge) -> Result<()> {
    graph.add_node(&edge.origin);
    graph.add_node(&edge.destination);
    graph.add_edge(&edge.origin, &edge.destination, edge.distance)
}
