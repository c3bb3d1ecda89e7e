//! Layered graph layout for top-to-bottom rendering.
//!
//! Every call builds its own `LayoutGraph` from the nodes and edges it is
//! given. There is no shared layout state, so the same input always yields
//! the same positions.
//!
//! # Pipeline
//! 1. Ranking: longest path from the roots. Cycles are cut by a
//!    deterministic Kahn order; edges pointing backwards in that order do
//!    not constrain ranks.
//! 2. Ordering: nodes are grouped by branch inside each rank, then
//!    barycenter sweeps reorder them within their group. The ordering with
//!    the fewest crossings between adjacent ranks is kept.
//! 3. Coordinates: fixed-size boxes packed left to right with node and
//!    branch separation, then pulled towards their predecessors.
//!
//! Edges spanning more than one rank get no dummy nodes and are not counted
//! as crossings.

use crate::data::DependencyGraphData;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use tracing::debug;

/// Box sizes and spacing for the layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Horizontal gap between neighbouring boxes in a rank.
    pub node_sep: f64,
    /// Vertical gap between ranks.
    pub rank_sep: f64,
    /// Extra horizontal gap where two branches meet in a rank.
    pub branch_sep: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub max_crossing_iterations: usize,
    pub refinement_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 90.0,
            node_sep: 80.0,
            rank_sep: 120.0,
            branch_sep: 40.0,
            margin_x: 50.0,
            margin_y: 50.0,
            max_crossing_iterations: 24,
            refinement_passes: 4,
        }
    }
}

/// Top-left corner of a node box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    /// Box position per node id: the layout point minus half the box size.
    pub positions: BTreeMap<String, Position>,
    /// Rank per node id, 0 at the top.
    pub ranks: BTreeMap<String, usize>,
    /// Extent of the drawing including margins.
    pub width: f64,
    pub height: f64,
    /// Crossings between adjacent ranks in the chosen ordering.
    pub crossings: usize,
}

/// Index-based view of the graph, local to one layout call.
struct LayoutGraph<'a> {
    ids: Vec<&'a str>,
    /// Branch group per node, numbered by first appearance.
    group: Vec<usize>,
    adj: Vec<Vec<usize>>,
    radj: Vec<Vec<usize>>,
}

impl<'a> LayoutGraph<'a> {
    fn from_data(data: &'a DependencyGraphData) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: HashMap<&str, usize> = HashMap::new();
        let mut ids = Vec::with_capacity(data.nodes.len());
        let mut group = Vec::with_capacity(data.nodes.len());

        for node in &data.nodes {
            if index.contains_key(node.id.as_str()) {
                continue;
            }
            index.insert(node.id.as_str(), ids.len());
            ids.push(node.id.as_str());

            let next_group = groups.len();
            group.push(*groups.entry(node.branch_id.as_str()).or_insert(next_group));
        }

        let mut adj = vec![Vec::new(); ids.len()];
        let mut radj = vec![Vec::new(); ids.len()];
        let mut seen = HashSet::new();
        for edge in &data.edges {
            let (Some(&u), Some(&v)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
            else {
                continue;
            };
            if u != v && seen.insert((u, v)) {
                adj[u].push(v);
                radj[v].push(u);
            }
        }

        Self {
            ids,
            group,
            adj,
            radj,
        }
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Lays out `data` top to bottom.
pub fn layout(data: &DependencyGraphData, config: &LayoutConfig) -> Layout {
    let graph = LayoutGraph::from_data(data);
    if graph.len() == 0 {
        return Layout::default();
    }

    let ranks = assign_ranks(&graph);
    let (layers, crossings) = order_layers(&graph, &ranks, config.max_crossing_iterations);
    let xs = assign_x(&graph, &ranks, &layers, config);

    let half_w = config.node_width / 2.0;
    let half_h = config.node_height / 2.0;
    let min_left = xs
        .iter()
        .map(|x| x - half_w)
        .fold(f64::INFINITY, f64::min);
    let shift = config.margin_x - min_left;

    let mut result = Layout {
        crossings,
        ..Layout::default()
    };
    let mut max_right: f64 = 0.0;

    for (v, id) in graph.ids.iter().enumerate() {
        let center_x = xs[v] + shift;
        let center_y =
            config.margin_y + half_h + ranks[v] as f64 * (config.node_height + config.rank_sep);
        max_right = max_right.max(center_x + half_w);

        result.positions.insert(
            id.to_string(),
            Position {
                x: center_x - half_w,
                y: center_y - half_h,
            },
        );
        result.ranks.insert(id.to_string(), ranks[v]);
    }

    let rank_count = layers.len() as f64;
    result.width = max_right + config.margin_x;
    result.height = 2.0 * config.margin_y
        + rank_count * config.node_height
        + (rank_count - 1.0) * config.rank_sep;

    debug!(
        "Laid out {} nodes in {} ranks ({} crossings)",
        graph.len(),
        layers.len(),
        crossings
    );
    result
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

fn assign_ranks(graph: &LayoutGraph) -> Vec<usize> {
    let n = graph.len();
    let mut in_deg: Vec<usize> = graph.radj.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| in_deg[v] == 0).collect();
    let mut order = Vec::with_capacity(n);
    let mut placed = vec![false; n];

    while let Some(u) = queue.pop_front() {
        order.push(u);
        placed[u] = true;
        for &v in &graph.adj[u] {
            in_deg[v] -= 1;
            if in_deg[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    // Nodes stuck behind a cycle, in node order
    order.extend((0..n).filter(|&v| !placed[v]));

    let mut pos = vec![0usize; n];
    for (i, &v) in order.iter().enumerate() {
        pos[v] = i;
    }

    let mut rank = vec![0usize; n];
    for &u in &order {
        for &v in &graph.adj[u] {
            if pos[v] > pos[u] && rank[v] < rank[u] + 1 {
                rank[v] = rank[u] + 1;
            }
        }
    }
    rank
}

// ---------------------------------------------------------------------------
// Ordering within ranks
// ---------------------------------------------------------------------------

fn order_layers(
    graph: &LayoutGraph,
    ranks: &[usize],
    max_iterations: usize,
) -> (Vec<Vec<usize>>, usize) {
    let num_ranks = ranks.iter().copied().max().unwrap_or(0) + 1;
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); num_ranks];
    for (v, &r) in ranks.iter().enumerate() {
        layers[r].push(v);
    }
    for layer in &mut layers {
        layer.sort_by_key(|&v| (graph.group[v], v));
    }

    let mut best_crossings = count_crossings(&layers, graph, ranks);
    let mut best_layers = layers.clone();

    for iter in 0..max_iterations {
        if best_crossings == 0 {
            break;
        }

        if iter % 2 == 0 {
            for i in 1..num_ranks {
                barycenter_sort(&mut layers, i, graph, ranks, true);
            }
        } else {
            for i in (0..num_ranks.saturating_sub(1)).rev() {
                barycenter_sort(&mut layers, i, graph, ranks, false);
            }
        }

        let c = count_crossings(&layers, graph, ranks);
        if c < best_crossings {
            best_crossings = c;
            best_layers = layers.clone();
        }
    }

    (best_layers, best_crossings)
}

fn positions_in_layers(layers: &[Vec<usize>], n: usize) -> Vec<usize> {
    let mut pos = vec![0usize; n];
    for layer in layers {
        for (p, &v) in layer.iter().enumerate() {
            pos[v] = p;
        }
    }
    pos
}

/// Crossings between adjacent ranks, O(E log E) per call.
///
/// Edges leaving a rank are sorted by source then target position; two
/// edges cross exactly when their targets are inverted in that order.
fn count_crossings(layers: &[Vec<usize>], graph: &LayoutGraph, ranks: &[usize]) -> usize {
    let pos = positions_in_layers(layers, graph.len());
    let mut crossings = 0;

    for layer in layers {
        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for &u in layer {
            for &v in &graph.adj[u] {
                if ranks[v] == ranks[u] + 1 {
                    pairs.push((pos[u], pos[v]));
                }
            }
        }

        pairs.sort_unstable();
        let mut targets: Vec<usize> = pairs.into_iter().map(|(_, b)| b).collect();
        crossings += count_inversions(&mut targets);
    }
    crossings
}

/// Counts pairs `i < j` with `values[i] > values[j]`, sorting `values`.
fn count_inversions(values: &mut [usize]) -> usize {
    let len = values.len();
    if len < 2 {
        return 0;
    }

    let mid = len / 2;
    let mut inversions = count_inversions(&mut values[..mid]) + count_inversions(&mut values[mid..]);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        if values[j] < values[i] {
            inversions += mid - i;
            merged.push(values[j]);
            j += 1;
        } else {
            merged.push(values[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&values[i..mid]);
    merged.extend_from_slice(&values[j..]);
    values.copy_from_slice(&merged);

    inversions
}

fn barycenter_sort(
    layers: &mut [Vec<usize>],
    layer_idx: usize,
    graph: &LayoutGraph,
    ranks: &[usize],
    downward: bool,
) {
    let ref_rank = if downward {
        match layer_idx.checked_sub(1) {
            Some(r) => r,
            None => return,
        }
    } else if layer_idx + 1 < layers.len() {
        layer_idx + 1
    } else {
        return;
    };

    let pos = positions_in_layers(layers, graph.len());
    let layer = &layers[layer_idx];

    let mut keyed: Vec<(usize, f64, usize)> = layer
        .iter()
        .enumerate()
        .map(|(current, &v)| {
            let neighbors = if downward { &graph.radj[v] } else { &graph.adj[v] };
            let relevant: Vec<f64> = neighbors
                .iter()
                .filter(|&&u| ranks[u] == ref_rank)
                .map(|&u| pos[u] as f64)
                .collect();
            let bary = if relevant.is_empty() {
                current as f64
            } else {
                relevant.iter().sum::<f64>() / relevant.len() as f64
            };
            (graph.group[v], bary, v)
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.total_cmp(&b.1))
            .then_with(|| a.2.cmp(&b.2))
    });

    layers[layer_idx] = keyed.into_iter().map(|(_, _, v)| v).collect();
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// Box centers on the x axis, before margins are applied.
fn assign_x(
    graph: &LayoutGraph,
    ranks: &[usize],
    layers: &[Vec<usize>],
    config: &LayoutConfig,
) -> Vec<f64> {
    let gap = |a: usize, b: usize| {
        let mut gap = config.node_width + config.node_sep;
        if graph.group[a] != graph.group[b] {
            gap += config.branch_sep;
        }
        gap
    };

    let mut x = vec![0.0f64; graph.len()];

    // Pack each rank and center it on zero
    for layer in layers {
        let mut cx = 0.0;
        for (i, &v) in layer.iter().enumerate() {
            if i > 0 {
                cx += gap(layer[i - 1], v);
            }
            x[v] = cx;
        }
        let mid = cx / 2.0;
        for &v in layer {
            x[v] -= mid;
        }
    }

    // Pull nodes under their predecessors, keeping order and separation
    for _ in 0..config.refinement_passes {
        for layer in layers.iter().skip(1) {
            let desired: Vec<f64> = layer
                .iter()
                .map(|&v| {
                    let above: Vec<f64> = graph.radj[v]
                        .iter()
                        .filter(|&&u| ranks[u] < ranks[v])
                        .map(|&u| x[u])
                        .collect();
                    if above.is_empty() {
                        x[v]
                    } else {
                        above.iter().sum::<f64>() / above.len() as f64
                    }
                })
                .collect();

            for (i, &v) in layer.iter().enumerate() {
                let mut target = desired[i];
                if i > 0 {
                    let prev = layer[i - 1];
                    target = target.max(x[prev] + gap(prev, v));
                }
                x[v] = target;
            }
        }
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GraphNode;
    use crate::edge::Edge;

    fn node(id: &str, branch: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            path: id.to_string(),
            additions: 0,
            deletions: 0,
            children_count: 0,
            branch_id: branch.to_string(),
            branch_color: "#000000".to_string(),
            level: 0,
            children: Vec::new(),
            parent: None,
        }
    }

    fn data(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> DependencyGraphData {
        DependencyGraphData {
            nodes: nodes.iter().map(|(id, b)| node(id, b)).collect(),
            edges: edges.iter().map(|(f, t)| Edge::new(*f, *t)).collect(),
        }
    }

    fn pos(layout: &Layout, id: &str) -> Position {
        layout.positions[id]
    }

    #[test]
    fn test_empty() {
        let result = layout(&DependencyGraphData::default(), &LayoutConfig::default());
        assert!(result.positions.is_empty());
        assert_eq!(result.crossings, 0);
    }

    #[test]
    fn test_single_node_sits_at_margin() {
        let result = layout(&data(&[("a", "b0")], &[]), &LayoutConfig::default());
        assert_eq!(pos(&result, "a"), Position { x: 50.0, y: 50.0 });
        assert_eq!(result.width, 280.0);
        assert_eq!(result.height, 190.0);
    }

    #[test]
    fn test_chain_stacks_vertically() {
        let d = data(&[("a", "b0"), ("b", "b0"), ("c", "b0")], &[("a", "b"), ("b", "c")]);
        let result = layout(&d, &LayoutConfig::default());

        assert_eq!(result.ranks["c"], 2);
        assert_eq!(pos(&result, "a").y, 50.0);
        assert_eq!(pos(&result, "b").y, 260.0);
        assert_eq!(pos(&result, "c").y, 470.0);
        assert_eq!(pos(&result, "a").x, pos(&result, "c").x);
    }

    #[test]
    fn test_longest_path_ranking() {
        // a → b → c and a → c: c sits below b
        let d = data(
            &[("a", "b0"), ("b", "b0"), ("c", "b0")],
            &[("a", "b"), ("b", "c"), ("a", "c")],
        );
        let result = layout(&d, &LayoutConfig::default());
        assert_eq!(result.ranks["c"], 2);
    }

    #[test]
    fn test_no_overlap_within_rank() {
        let d = data(
            &[("a", "b0"), ("b", "b0"), ("c", "b0"), ("d", "b0")],
            &[("a", "b"), ("a", "c"), ("a", "d")],
        );
        let config = LayoutConfig::default();
        let result = layout(&d, &config);

        let row: Vec<f64> = ["b", "c", "d"].iter().map(|id| pos(&result, id).x).collect();
        for i in 0..row.len() {
            for j in (i + 1)..row.len() {
                assert!((row[i] - row[j]).abs() >= config.node_width + config.node_sep);
            }
        }
        assert!(result.positions.values().all(|p| p.x >= 0.0 && p.y >= 0.0));
    }

    #[test]
    fn test_branches_stay_grouped() {
        let d = data(
            &[("r0", "branch-0"), ("a", "branch-0"), ("b", "branch-0"), ("r1", "branch-1"), ("c", "branch-1")],
            &[("r0", "a"), ("r0", "b"), ("r1", "c")],
        );
        let config = LayoutConfig::default();
        let result = layout(&d, &config);

        let right_of_branch0 = pos(&result, "a").x.max(pos(&result, "b").x);
        let gap = pos(&result, "c").x - right_of_branch0;
        assert!(gap >= config.node_width + config.node_sep + config.branch_sep);
    }

    #[test]
    fn test_barycenter_removes_crossing() {
        // a → d and b → c start out crossed
        let d = data(
            &[("a", "b0"), ("b", "b0"), ("c", "b0"), ("d", "b0")],
            &[("a", "d"), ("b", "c")],
        );
        let result = layout(&d, &LayoutConfig::default());
        assert_eq!(result.crossings, 0);
        assert!(pos(&result, "d").x < pos(&result, "c").x);
    }

    #[test]
    fn test_count_inversions() {
        assert_eq!(count_inversions(&mut []), 0);
        assert_eq!(count_inversions(&mut [1, 2, 2, 3]), 0);
        assert_eq!(count_inversions(&mut [3, 2, 1]), 3);
        let mut values = [2, 4, 1, 3, 5];
        assert_eq!(count_inversions(&mut values), 3);
        assert_eq!(values, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_crossings_match_pairwise_count() {
        // Deterministic pseudo-random two-rank graph with shared endpoints
        let tops: Vec<String> = (0..12).map(|i| format!("t{}", i)).collect();
        let bottoms: Vec<String> = (0..12).map(|i| format!("b{}", i)).collect();
        let mut nodes: Vec<(&str, &str)> = tops.iter().map(|t| (t.as_str(), "b0")).collect();
        nodes.extend(bottoms.iter().map(|b| (b.as_str(), "b0")));

        let mut seed: u64 = 7;
        let mut edges = Vec::new();
        for _ in 0..40 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let t = (seed >> 33) as usize % tops.len();
            let b = (seed >> 13) as usize % bottoms.len();
            edges.push((tops[t].as_str(), bottoms[b].as_str()));
        }

        let d = data(&nodes, &edges);
        let graph = LayoutGraph::from_data(&d);
        let ranks = assign_ranks(&graph);
        let mut layers: Vec<Vec<usize>> = vec![Vec::new(); 2];
        for (v, &r) in ranks.iter().enumerate() {
            layers[r].push(v);
        }

        let pos = positions_in_layers(&layers, graph.len());
        let mut pairs = Vec::new();
        for u in 0..graph.len() {
            for &v in &graph.adj[u] {
                pairs.push((pos[u], pos[v]));
            }
        }
        let mut pairwise = 0;
        for i in 0..pairs.len() {
            for j in (i + 1)..pairs.len() {
                let ((a1, b1), (a2, b2)) = (pairs[i], pairs[j]);
                if (a1 < a2 && b1 > b2) || (a1 > a2 && b1 < b2) {
                    pairwise += 1;
                }
            }
        }

        assert!(pairwise > 0);
        assert_eq!(count_crossings(&layers, &graph, &ranks), pairwise);
    }

    #[test]
    fn test_cycle_terminates() {
        let d = data(
            &[("a", "b0"), ("b", "b0"), ("c", "b0")],
            &[("a", "b"), ("b", "c"), ("c", "a")],
        );
        let result = layout(&d, &LayoutConfig::default());
        assert_eq!(result.positions.len(), 3);
        assert_eq!(result.ranks["a"], 0);
        assert_eq!(result.ranks["c"], 2);
    }

    #[test]
    fn test_deterministic() {
        let d = data(
            &[("a", "b0"), ("b", "b0"), ("c", "b1"), ("d", "b1"), ("e", "b0")],
            &[("a", "b"), ("c", "d"), ("a", "e"), ("c", "e")],
        );
        let config = LayoutConfig::default();
        assert_eq!(layout(&d, &config), layout(&d, &config));
    }

    #[test]
    fn test_unknown_edges_ignored() {
        let d = data(&[("a", "b0")], &[("a", "ghost"), ("a", "a")]);
        let result = layout(&d, &LayoutConfig::default());
        assert_eq!(result.ranks["a"], 0);
    }
}
