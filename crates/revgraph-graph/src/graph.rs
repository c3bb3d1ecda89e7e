//! Core graph data structure.
//!
//! `ReviewGraph` wraps a petgraph `DiGraph` of changed files and keeps a
//! path index for lookups. It is built fresh for each analysis run from the
//! filtered edge set and answers the structural questions the classifier
//! and assembler need: in-degrees, direct successors and transitive
//! reachability.

use crate::edge::Edge;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};
use petgraph::Direction;
use revgraph_core::FileRecord;
use std::collections::HashMap;

/// Index of a file in the graph.
pub type NodeId = NodeIndex;

/// Changed files connected by review-order edges.
#[derive(Debug, Clone, Default)]
pub struct ReviewGraph {
    graph: DiGraph<FileRecord, Edge>,

    /// Maps paths to graph node indexes.
    path_index: HashMap<String, NodeId>,
}

impl ReviewGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from files and already-filtered edges.
    ///
    /// Edges with an unknown endpoint, self-edges and repeated pairs are
    /// skipped.
    pub fn from_parts(files: &[FileRecord], edges: &[Edge]) -> Self {
        let mut graph = Self::new();
        for file in files {
            graph.add_file(file.clone());
        }
        for edge in edges {
            graph.add_edge(edge.clone());
        }
        graph
    }

    /// Adds a file. A path that is already present keeps its first record.
    pub fn add_file(&mut self, file: FileRecord) -> NodeId {
        if let Some(&existing) = self.path_index.get(&file.path) {
            return existing;
        }
        let path = file.path.clone();
        let index = self.graph.add_node(file);
        self.path_index.insert(path, index);
        index
    }

    /// Adds an edge between two known files.
    ///
    /// Returns `false` if the edge was rejected.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let (Some(from), Some(to)) = (self.get_index(&edge.from), self.get_index(&edge.to)) else {
            return false;
        };
        if from == to || self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, edge);
        true
    }

    /// Gets the node index for a path.
    pub fn get_index(&self, path: &str) -> Option<NodeId> {
        self.path_index.get(path).copied()
    }

    /// Path of the file at `id`.
    pub fn path(&self, id: NodeId) -> Option<&str> {
        self.graph.node_weight(id).map(|file| file.path.as_str())
    }

    /// Iterates over node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices()
    }

    /// Number of distinct predecessors of `id`.
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.graph.edges_directed(id, Direction::Incoming).count()
    }

    /// Direct successors of `id`, in edge insertion order.
    pub fn successor_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut outgoing: Vec<_> = self.graph.edges_directed(id, Direction::Outgoing).collect();
        outgoing.sort_by_key(|edge_ref| edge_ref.id());
        outgoing.into_iter().map(|edge_ref| edge_ref.target()).collect()
    }

    /// Direct successors of `path`, in edge insertion order.
    pub fn successors(&self, path: &str) -> Vec<&str> {
        let Some(index) = self.get_index(path) else {
            return Vec::new();
        };
        self.successor_ids(index)
            .into_iter()
            .filter_map(|id| self.path(id))
            .collect()
    }

    /// Every file reachable from `path` through one or more edges.
    ///
    /// Iterative BFS, so cycles terminate and `path` itself is never
    /// included.
    pub fn descendants(&self, path: &str) -> Vec<&str> {
        let Some(start) = self.get_index(path) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(index) = bfs.next(&self.graph) {
            if index == start {
                continue;
            }
            if let Some(file) = self.graph.node_weight(index) {
                result.push(file.path.as_str());
            }
        }
        result
    }

    /// Number of files reachable from `path`, excluding itself.
    pub fn descendant_count(&self, path: &str) -> usize {
        self.descendants(path).len()
    }

    /// Returns the number of files.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(paths: &[&str], edges: &[(&str, &str)]) -> ReviewGraph {
        let files: Vec<FileRecord> = paths.iter().map(|p| FileRecord::path_only(*p)).collect();
        let edges: Vec<Edge> = edges.iter().map(|(f, t)| Edge::new(*f, *t)).collect();
        ReviewGraph::from_parts(&files, &edges)
    }

    #[test]
    fn test_empty_graph() {
        let g = ReviewGraph::new();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.descendant_count("missing"), 0);
        assert!(g.successors("missing").is_empty());
    }

    #[test]
    fn test_rejects_bad_edges() {
        let g = graph(&["a", "b"], &[("a", "b"), ("a", "b"), ("a", "a"), ("a", "zzz")]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_file_keeps_first() {
        let mut g = ReviewGraph::new();
        let first = g.add_file(FileRecord::new("a.ts", 1, 1));
        let second = g.add_file(FileRecord::new("a.ts", 9, 9));
        assert_eq!(first, second);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.path(first), Some("a.ts"));
    }

    #[test]
    fn test_successors_keep_insertion_order() {
        let g = graph(&["a", "b", "c", "d"], &[("a", "c"), ("a", "b"), ("a", "d")]);
        assert_eq!(g.successors("a"), vec!["c", "b", "d"]);
        let b = g.get_index("b").unwrap();
        assert_eq!(g.in_degree(b), 1);
        assert_eq!(g.in_degree(g.get_index("a").unwrap()), 0);
    }

    #[test]
    fn test_diamond_descendants() {
        //     a
        //    / \
        //   b   c
        //    \ /
        //     d
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        assert_eq!(g.descendant_count("a"), 3);
        assert_eq!(g.descendant_count("b"), 1);
        assert_eq!(g.descendant_count("d"), 0);
        assert_eq!(g.in_degree(g.get_index("d").unwrap()), 2);
    }

    #[test]
    fn test_cycle_no_infinite_loop() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(g.descendant_count("a"), 2);
        assert_eq!(g.successors("c"), vec!["a"]);
    }
}
