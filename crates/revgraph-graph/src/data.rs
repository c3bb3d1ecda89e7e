//! Output structures handed to renderers.
//!
//! These serialize to the camelCase JSON the graph viewer reads.

use crate::edge::Edge;
use crate::layout::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A changed file with its graph statistics and branch placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Same as `path`.
    pub id: String,
    /// Basename.
    pub label: String,
    pub path: String,
    pub additions: u32,
    pub deletions: u32,
    /// Files reachable from this one, excluding itself.
    pub children_count: usize,
    pub branch_id: String,
    pub branch_color: String,
    pub level: usize,
    /// Direct successors.
    pub children: Vec<String>,
    /// Display parent: the predecessor that first reached this node while
    /// classifying branches. Other predecessors are only in the edge list.
    pub parent: Option<String>,
}

/// The assembled review graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraphData {
    /// Sorted by branch, then level, then label.
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
}

impl DependencyGraphData {
    /// Finds a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Groups nodes by branch, keeping display order.
    pub fn branches(&self) -> Vec<(&str, Vec<&GraphNode>)> {
        let mut groups: Vec<(&str, Vec<&GraphNode>)> = Vec::new();
        for node in &self.nodes {
            let continues = groups
                .last()
                .map_or(false, |(id, _)| *id == node.branch_id);
            if !continues {
                groups.push((node.branch_id.as_str(), Vec::new()));
            }
            if let Some((_, members)) = groups.last_mut() {
                members.push(node);
            }
        }
        groups
    }

    /// Node ids in review order.
    pub fn review_order(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }
}

/// A graph together with laid-out node positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutedGraph {
    #[serde(flatten)]
    pub graph: DependencyGraphData,
    /// Top-left corner of each node box, keyed by node id.
    pub positions: BTreeMap<String, Position>,
}
