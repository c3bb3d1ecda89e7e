//! Branch classification.
//!
//! Splits the review graph into branches: one per root, holding every node
//! a breadth-first walk from that root reaches first. Roots are walked in
//! input order and a node claimed by an earlier branch is never reassigned,
//! so the result depends only on the input order.
//!
//! # Display parent
//!
//! The graph is a DAG, and a node may have several predecessors. Each node
//! still records exactly one *display parent*: the node the BFS was
//! expanding when it first reached it. This is what keeps levels well
//! defined (`level(child) == level(parent) + 1`). Do not replace it with a
//! multi-parent model; the full dependency set is the edge list.

use crate::graph::{NodeId, ReviewGraph};
use crate::palette::{Palette, ORPHAN_COLOR};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Branch id given to nodes no traversal reached.
pub const ORPHAN_BRANCH: &str = "branch-orphan";

/// Branch membership of a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    pub branch_id: String,
    /// BFS depth from the branch root.
    pub level: usize,
    /// Hex color from the palette.
    pub color: String,
    /// Predecessor that first reached this node. `None` for roots and orphans.
    pub display_parent: Option<String>,
}

impl BranchInfo {
    fn orphan() -> Self {
        Self {
            branch_id: ORPHAN_BRANCH.to_string(),
            level: 0,
            color: ORPHAN_COLOR.to_string(),
            display_parent: None,
        }
    }
}

/// A branch and its members in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub id: String,
    pub root: String,
    /// Color of the root, i.e. the branch's lightest shade.
    pub color: String,
    pub members: Vec<String>,
}

/// Result of [`classify`].
#[derive(Debug, Clone, Default)]
pub struct BranchAssignment {
    /// Per-node info, parallel to the graph's insertion order.
    pub nodes: Vec<BranchInfo>,
    /// Branches in creation order. Orphans are not listed.
    pub branches: Vec<Branch>,
}

impl BranchAssignment {
    /// Number of nodes that fell through to the orphan branch.
    pub fn orphan_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.branch_id == ORPHAN_BRANCH)
            .count()
    }
}

/// Assigns every file in `graph` a branch, level and color.
///
/// Roots are walked in insertion order and children in edge insertion
/// order, so the result is deterministic for a given file and edge order.
pub fn classify(graph: &ReviewGraph, palette: &Palette) -> BranchAssignment {
    let n = graph.node_count();
    let path = |id: NodeId| graph.path(id).unwrap_or_default().to_string();

    let mut slots: Vec<Option<BranchInfo>> = vec![None; n];
    let mut branches = Vec::new();

    for root in find_roots(graph) {
        if slots[root.index()].is_some() {
            continue;
        }

        let branch_index = branches.len();
        let branch_id = format!("branch-{}", branch_index);
        let mut members = Vec::new();
        let mut queue = VecDeque::new();

        slots[root.index()] = Some(BranchInfo {
            branch_id: branch_id.clone(),
            level: 0,
            color: palette.color(branch_index, 0).to_string(),
            display_parent: None,
        });
        queue.push_back((root, 0usize));

        while let Some((current, level)) = queue.pop_front() {
            members.push(path(current));

            for child in graph.successor_ids(current) {
                if slots[child.index()].is_some() {
                    continue;
                }
                slots[child.index()] = Some(BranchInfo {
                    branch_id: branch_id.clone(),
                    level: level + 1,
                    color: palette.color(branch_index, level + 1).to_string(),
                    display_parent: Some(path(current)),
                });
                queue.push_back((child, level + 1));
            }
        }

        branches.push(Branch {
            id: branch_id,
            root: path(root),
            color: palette.color(branch_index, 0).to_string(),
            members,
        });
    }

    let nodes: Vec<BranchInfo> = slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(BranchInfo::orphan))
        .collect();

    let assignment = BranchAssignment { nodes, branches };
    debug!(
        "Classified {} nodes into {} branches ({} orphans)",
        n,
        assignment.branches.len(),
        assignment.orphan_count()
    );
    assignment
}

/// Nodes with no incoming edge, in insertion order.
///
/// When every node has a predecessor (a pure cycle), the nodes with the
/// fewest incoming edges stand in as roots so traversal can start.
fn find_roots(graph: &ReviewGraph) -> Vec<NodeId> {
    let in_degrees: Vec<(NodeId, usize)> = graph
        .node_ids()
        .map(|id| (id, graph.in_degree(id)))
        .collect();

    let min_in = in_degrees.iter().map(|&(_, d)| d).min().unwrap_or(0);
    if min_in > 0 {
        debug!("No roots found, falling back to nodes with in-degree {}", min_in);
    }

    in_degrees
        .into_iter()
        .filter(|&(_, d)| d == min_in)
        .map(|(id, _)| id)
        .collect()
}
