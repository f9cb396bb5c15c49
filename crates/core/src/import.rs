//! Bulk import of road connections from delimited text.
//!
//! The input is CSV with a header row followed by one connection per record:
//!
//! ```text
//! origin,destination,distance
//! Antigua Guatemala,Chimaltenango,17
//! Chimaltenango,Tecpán,35
//! ```
//!
//! Import is lenient: a record is applied only when it has exactly three
//! fields and the distance is a plain run of ASCII digits. Anything else is
//! skipped and listed in the [`ImportReport`]; the remaining records are
//! still applied. Only an unreadable source aborts the import.
//!
//! # Example
//!
//! ```
//! use road_graph_core::{import, Graph};
//!
//! # fn main() -> Result<(), road_graph_core::Error> {
//! let csv = "origin,destination,distance\nMixco,Villa Nueva,21\nMixco,Chinautla,abc\n";
//! let mut graph = Graph::new();
//! let report = import::import_csv(&mut graph, csv.as_bytes())?;
//!
//! assert_eq!(report.applied.len(), 1);
//! assert_eq!(report.skipped.len(), 1);
//! assert_eq!(graph.breadth_first("Mixco"), vec!["Mixco", "Villa Nueva"]);
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{Edge, Graph};

/// Outcome of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Connections added to the graph, in file order
    pub applied: Vec<Edge>,
    /// Records that were ignored
    pub skipped: Vec<SkippedRecord>,
}

/// A record that was not applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// 1-indexed line in the source
    pub line: u64,
    pub reason: SkipReason,
}

/// Why a record was ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Expected origin, destination and distance.
    FieldCount(usize),
    /// Distance is not a non-negative integer.
    InvalidDistance(String),
    /// The record itself could not be decoded (e.g. invalid UTF-8).
    Malformed(String),
}

/// Parse a distance the way interactive and imported input is validated
///
/// Only non-empty strings of ASCII digits that fit in a `u32` are accepted;
/// signs, whitespace and decimals are rejected.
pub fn parse_distance(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Apply every valid record from `reader` to `graph`
///
/// The first record is treated as a header and skipped. Each valid record
/// registers both endpoints and then adds the connection.
///
/// # Errors
/// Returns an error only if the underlying reader fails. Malformed records
/// are reported in the returned [`ImportReport`] instead.
pub fn import_csv<R: Read>(graph: &mut Graph, reader: R) -> Result<ImportReport> {
    import_csv_with(graph, reader, |_| Ok(()))
}

/// [`import_csv`] with a hook run for each valid record
///
/// `persist` sees each connection before it is added to `graph`. If it
/// fails, that record is not applied and the import stops with its error.
/// Whenever this returns an error, `graph` holds exactly the records that
/// `persist` accepted.
pub fn import_csv_with<R, F>(
    graph: &mut Graph,
    reader: R,
    mut persist: F,
) -> Result<ImportReport>
where
    R: Read,
    F: FnMut(&Edge) -> Result<()>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut report = ImportReport::default();

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or(0);
                tracing::warn!(line, error = %err, "Skipping unreadable record");
                report.skipped.push(SkippedRecord {
                    line,
                    reason: SkipReason::Malformed(err.to_string()),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 3 {
            report.skipped.push(SkippedRecord {
                line,
                reason: SkipReason::FieldCount(record.len()),
            });
            continue;
        }

        let (origin, destination, raw_distance) = (&record[0], &record[1], &record[2]);
        let Some(distance) = parse_distance(raw_distance) else {
            report.skipped.push(SkippedRecord {
                line,
                reason: SkipReason::InvalidDistance(raw_distance.to_string()),
            });
            continue;
        };

        let edge = Edge::new(origin, destination, distance);
        persist(&edge)?;
        graph.add_node(origin);
        graph.add_node(destination);
        graph.add_edge(origin, destination, distance)?;
        report.applied.push(edge);
    }

    tracing::info!(
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        "CSV import finished"
    );
    Ok(report)
}

/// Open `path` and run [`import_csv`] on it
pub fn import_csv_path(graph: &mut Graph, path: &Path) -> Result<ImportReport> {
    let file = File::open(path)?;
    import_csv(graph, file)
}
