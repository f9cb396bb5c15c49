//! Subcommand implementations.
//!
//! Each command writes its result to `out` in the requested format, so the
//! same code serves the terminal and the tests.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use road_graph_core::{render, EdgeStore, Error, Neighbor, Session, Traversal};
use serde::Serialize;

use crate::OutputFormat;

#[derive(Serialize)]
struct NodeView<'a> {
    name: &'a str,
    neighbors: &'a [Neighbor],
}

#[derive(Serialize)]
struct TraversalView<'a> {
    traversal: Traversal,
    start: &'a str,
    order: &'a [String],
}

pub fn connect<S: EdgeStore>(
    session: &mut Session<S>,
    origin: &str,
    destination: &str,
    distance: u32,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let edge = session
        .connect(origin, destination, distance)
        .context("connection not added")?;

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&edge)?)?,
        OutputFormat::Text => writeln!(
            out,
            "Connection added: {} - {} ({} km)",
            edge.origin, edge.destination, edge.distance
        )?,
    }
    Ok(())
}

pub fn import<S: EdgeStore>(
    session: &mut Session<S>,
    file: &Path,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let report = session
        .import_path(file)
        .with_context(|| format!("failed to import {}", file.display()))?;

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
        OutputFormat::Text => {
            writeln!(
                out,
                "CSV file loaded: {} ({} applied, {} skipped)",
                file.display(),
                report.applied.len(),
                report.skipped.len()
            )?;
            for skipped in &report.skipped {
                writeln!(out, "  skipped line {}: {:?}", skipped.line, skipped.reason)?;
            }
        }
    }
    Ok(())
}

pub fn show<S: EdgeStore>(
    session: &Session<S>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let graph = session.graph();
    match format {
        OutputFormat::Json => {
            let nodes: Vec<NodeView> = graph
                .nodes()
                .map(|name| NodeView {
                    name,
                    neighbors: graph.neighbors(name),
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&nodes)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Road network:")?;
            write!(out, "{}", graph)?;
        }
    }
    Ok(())
}

pub fn traverse<S: EdgeStore>(
    session: &Session<S>,
    traversal: Traversal,
    start: &str,
    dot_path: Option<&Path>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let order = match session.traverse(traversal, start) {
        Ok(order) => order,
        Err(Error::UnknownNode(name)) => {
            anyhow::bail!("'{}' is not a known municipality for {}", name, traversal)
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(path) = dot_path {
        std::fs::write(path, render::render_dot(session.graph(), Some(order.as_slice())))
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote DOT rendering");
    }

    match format {
        OutputFormat::Json => {
            let view = TraversalView {
                traversal,
                start,
                order: &order,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        }
        OutputFormat::Text => writeln!(
            out,
            "{} from {}: {}",
            traversal,
            start,
            render::describe_order(&order)
        )?,
    }
    Ok(())
}

pub fn dot<S: EdgeStore>(
    session: &Session<S>,
    highlight: Option<(Traversal, &str)>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let order = match highlight {
        Some((traversal, start)) => Some(session.traverse(traversal, start)?),
        None => None,
    };
    write!(out, "{}", render::render_dot(session.graph(), order.as_deref()))?;
    Ok(())
}
