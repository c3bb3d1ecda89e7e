//! Deduplication and filtering of inferred edges.
//!
//! Order of operations is fixed: duplicates collapse first, then edges
//! leaving an ignored parent are removed. Removed edges are never
//! redirected to another source.

use crate::edge::{Edge, InferredEdge};
use revgraph_core::{basename, FileRecord};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Collapses candidates to one edge per `(from, to)` pair.
///
/// The first occurrence keeps its position; rules from later duplicates
/// are merged into it.
pub fn dedup_edges(candidates: Vec<InferredEdge>) -> Vec<Edge> {
    let mut edges: Vec<Edge> = Vec::new();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();

    for candidate in candidates {
        let key = (candidate.from.clone(), candidate.to.clone());
        match seen.get(&key) {
            Some(&idx) => edges[idx].add_rule(candidate.rule),
            None => {
                seen.insert(key, edges.len());
                edges.push(Edge::from(candidate));
            }
        }
    }

    edges
}

/// Drops every edge whose source basename is in `ignored`.
pub fn filter_ignored_parents(edges: Vec<Edge>, ignored: &[String]) -> Vec<Edge> {
    let ignored: HashSet<&str> = ignored.iter().map(String::as_str).collect();
    let before = edges.len();

    let kept: Vec<Edge> = edges
        .into_iter()
        .filter(|edge| !ignored.contains(basename(&edge.from)))
        .collect();

    if kept.len() != before {
        debug!("Dropped {} edges from ignored parents", before - kept.len());
    }
    kept
}

/// Drops self-edges and edges naming a path outside `files`.
pub fn drop_dangling_edges(edges: Vec<Edge>, files: &[FileRecord]) -> Vec<Edge> {
    let known: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();

    edges
        .into_iter()
        .filter(|edge| {
            let valid = edge.from != edge.to
                && known.contains(edge.from.as_str())
                && known.contains(edge.to.as_str());
            if !valid {
                debug!("Dropping invalid edge {} → {}", edge.from, edge.to);
            }
            valid
        })
        .collect()
}

/// Full post-inference pass: dedup, ignored-parent filter, then validation.
pub fn filter_edges(
    candidates: Vec<InferredEdge>,
    files: &[FileRecord],
    ignored: &[String],
) -> Vec<Edge> {
    let edges = dedup_edges(candidates);
    let edges = filter_ignored_parents(edges, ignored);
    drop_dangling_edges(edges, files)
}
