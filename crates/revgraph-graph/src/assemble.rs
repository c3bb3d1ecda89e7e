//! Graph assembly: the full pipeline from file list to display graph.
//!
//! The assembler runs each stage in order and merges the results:
//! 1. Infer candidate edges from paths
//! 2. Deduplicate, drop ignored parents, validate endpoints
//! 3. Classify branches
//! 4. Attach statistics, children and display parents to each node
//! 5. Sort nodes for display

use crate::branch::classify;
use crate::config::GraphConfig;
use crate::data::{DependencyGraphData, GraphNode, LayoutedGraph};
use crate::filter::filter_edges;
use crate::graph::ReviewGraph;
use crate::inference::infer_edges;
use crate::layout::layout;
use revgraph_core::FileRecord;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Builds [`DependencyGraphData`] from an ordered file list.
#[derive(Debug, Clone, Default)]
pub struct GraphAssembler {
    config: GraphConfig,
}

impl GraphAssembler {
    /// Creates an assembler with the given configuration.
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Runs the pipeline on `files`.
    ///
    /// Never fails. Empty paths and repeated paths are dropped with a
    /// warning; an empty list gives an empty graph.
    pub fn assemble(&self, files: &[FileRecord]) -> DependencyGraphData {
        let files = unique_files(files);

        let candidates = infer_edges(&files);
        let edges = filter_edges(candidates, &files, &self.config.ignored_parents);

        let graph = ReviewGraph::from_parts(&files, &edges);
        let assignment = classify(&graph, &self.config.palette);

        let mut nodes: Vec<GraphNode> = files
            .iter()
            .zip(assignment.nodes)
            .map(|(file, info)| GraphNode {
                id: file.path.clone(),
                label: file.basename().to_string(),
                path: file.path.clone(),
                additions: file.additions,
                deletions: file.deletions,
                children_count: graph.descendant_count(&file.path),
                branch_id: info.branch_id,
                branch_color: info.color,
                level: info.level,
                children: graph
                    .successors(&file.path)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                parent: info.display_parent,
            })
            .collect();

        // Stable, so equal keys keep input order
        nodes.sort_by(|a, b| {
            a.branch_id
                .cmp(&b.branch_id)
                .then_with(|| a.level.cmp(&b.level))
                .then_with(|| a.label.cmp(&b.label))
        });

        debug!(
            "Assembled graph: {} nodes, {} edges",
            nodes.len(),
            graph.edge_count()
        );

        DependencyGraphData { nodes, edges }
    }

    /// Runs the pipeline and lays the result out.
    pub fn assemble_with_layout(&self, files: &[FileRecord]) -> LayoutedGraph {
        let graph = self.assemble(files);
        let positions = layout(&graph, &self.config.layout).positions;
        LayoutedGraph { graph, positions }
    }
}

/// Drops empty and repeated paths, keeping the first record of each.
fn unique_files(files: &[FileRecord]) -> Vec<FileRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::with_capacity(files.len());

    for (index, file) in files.iter().enumerate() {
        if file.path.is_empty() {
            warn!("Skipping file record {} with an empty path", index);
            continue;
        }
        if !seen.insert(file.path.as_str()) {
            warn!("Skipping duplicate file record for {}", file.path);
            continue;
        }
        unique.push(file.clone());
    }
    unique
}

/// Runs the pipeline with the default configuration.
pub fn analyze(files: &[FileRecord]) -> DependencyGraphData {
    GraphAssembler::default().assemble(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<FileRecord> {
        paths.iter().map(|p| FileRecord::path_only(*p)).collect()
    }

    #[test]
    fn test_index_scenario() {
        let input = vec![
            FileRecord::new("src/index.ts", 10, 2),
            FileRecord::new("src/util.ts", 4, 0),
        ];
        let graph = analyze(&input);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges[0].key(), ("src/util.ts", "src/index.ts"));

        let util = graph.node("src/util.ts").unwrap();
        assert_eq!(util.children_count, 1);
        assert_eq!(util.level, 0);
        assert_eq!(util.parent, None);
        assert_eq!(util.children, vec!["src/index.ts".to_string()]);

        let index = graph.node("src/index.ts").unwrap();
        assert_eq!(index.children_count, 0);
        assert_eq!(index.level, 1);
        assert_eq!(index.branch_id, util.branch_id);
        assert_eq!(index.parent.as_deref(), Some("src/util.ts"));
        assert_eq!(index.additions, 10);
        assert_eq!(index.label, "index.ts");
    }

    #[test]
    fn test_nodes_sorted_by_branch_level_label() {
        let graph = analyze(&files(&["z.ts", "src/index.ts", "src/b.ts", "src/a.ts"]));
        let order: Vec<&str> = graph.review_order().collect();
        // z.ts is its own branch-0; src/b.ts and src/a.ts root branches 1 and 2
        assert_eq!(order, vec!["z.ts", "src/b.ts", "src/index.ts", "src/a.ts"]);
    }

    #[test]
    fn test_duplicate_and_empty_paths_dropped() {
        let input = vec![
            FileRecord::new("a.ts", 1, 0),
            FileRecord::new("", 5, 5),
            FileRecord::new("a.ts", 9, 9),
        ];
        let graph = analyze(&input);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes[0].additions, 1);
    }

    #[test]
    fn test_custom_ignored_parents() {
        let assembler = GraphAssembler::new(GraphConfig::default().with_ignored_parents(["cfg.json"]));
        let graph = assembler.assemble(&files(&["src/cfg.json", "src/sub/a.ts"]));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.branches().len(), 2);
    }

    #[test]
    fn test_with_layout_has_position_per_node() {
        let layouted = GraphAssembler::default()
            .assemble_with_layout(&files(&["src/index.ts", "src/util.ts", "README.md"]));
        assert_eq!(layouted.positions.len(), 3);
        assert!(layouted.positions.contains_key("src/index.ts"));
        assert!(layouted.positions["src/index.ts"].y > layouted.positions["src/util.ts"].y);
    }

    #[test]
    fn test_empty() {
        let graph = analyze(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
