//! Error types for the road graph library.

use thiserror::Error;

/// All errors that can occur in the road graph library.
#[derive(Error, Debug)]
pub enum Error {
    /// An edge endpoint was never registered with `add_node`.
    ///
    /// The graph is left untouched when this is returned.
    #[error("Edge references unregistered node: {node}")]
    InvalidReference { node: String },

    /// A traversal was requested from a node the session does not know.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// Interactive input that fails validation (empty names, bad distance).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited text could not be read at all.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Persistence layer failure.
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, Error>;
