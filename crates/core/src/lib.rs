//! Road Graph Core Library
//!
//! This library provides the road network graph between named locations,
//! its breadth-first and depth-first traversals, and the collaborators that
//! feed and consume it: CSV import, SQLite persistence and DOT rendering.

pub mod error;
pub mod graph;
pub mod import;
pub mod render;
pub mod session;
pub mod store;
pub mod traversal;

// Re-export commonly used types
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Neighbor};
pub use session::Session;
pub use store::{EdgeStore, SqliteStore};
pub use traversal::Traversal;
