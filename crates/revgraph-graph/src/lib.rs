//! Revgraph Graph - Review-order dependency graphs
//!
//! This crate turns an ordered list of changed files into a graph that
//! suggests a review order. Edges come from path and name heuristics, not
//! from parsing imports. The graph is then split into colored branches and
//! laid out in ranks for a top-down viewer.
//!
//! # Architecture
//!
//! Data flows one way through pure stages:
//! - `inference`: named rules propose `other → file` edges
//! - `filter`: duplicates collapse, ignored parents lose their edges
//! - `branch`: multi-source BFS assigns branch, level and color
//! - `assemble`: merges statistics into sorted `GraphNode`s
//! - `layout`: layered coordinates per node
//!
//! Running the pipeline twice on the same input gives identical output.
//!
//! # Example
//!
//! ```
//! use revgraph_core::FileRecord;
//! use revgraph_graph::GraphAssembler;
//!
//! let files = vec![
//!     FileRecord::new("src/index.ts", 3, 1),
//!     FileRecord::new("src/util.ts", 10, 0),
//! ];
//!
//! let graph = GraphAssembler::default().assemble(&files);
//! assert_eq!(graph.edges.len(), 1);
//! assert_eq!(graph.node("src/util.ts").unwrap().children_count, 1);
//! ```

mod assemble;
mod branch;
mod config;
mod data;
mod edge;
mod filter;
mod graph;
mod inference;
mod layout;
mod palette;

pub use assemble::{analyze, GraphAssembler};
pub use branch::{classify, Branch, BranchAssignment, BranchInfo, ORPHAN_BRANCH};
pub use config::{GraphConfig, DEFAULT_IGNORED_PARENTS};
pub use data::{DependencyGraphData, GraphNode, LayoutedGraph};
pub use edge::{Edge, EdgeRule, InferredEdge};
pub use filter::{dedup_edges, drop_dangling_edges, filter_edges, filter_ignored_parents};
pub use graph::{NodeId, ReviewGraph};
pub use inference::{infer_edges, matching_rules};
pub use layout::{layout, Layout, LayoutConfig, Position};
pub use palette::{Hue, Palette, ORPHAN_COLOR};
