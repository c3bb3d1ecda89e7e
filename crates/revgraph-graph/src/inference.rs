//! Heuristic edge inference.
//!
//! Every ordered pair of distinct files is checked against each
//! [`EdgeRule`]. A rule that matches proposes `other → file`: `other` is
//! the more general file and should be read first. Rules are independent,
//! so one pair can yield several candidates; [`crate::filter`] collapses
//! them.
//!
//! Name comparisons use the file stem (basename without extension).

use crate::edge::{EdgeRule, InferredEdge};
use revgraph_core::{FileRecord, ROOT_DIR};
use tracing::{debug, trace};

const TEST_INFIXES: [&str; 2] = [".test", ".spec"];

/// Shorter stems are too generic for the name-containment rule.
const MIN_CONTAINED_STEM_LEN: usize = 3;

/// Proposes candidate edges for every rule that matches a pair of files.
///
/// Pure and O(n²) in the number of files. Candidates come out in input
/// order (outer loop over `file`, inner over `other`), duplicates included.
pub fn infer_edges(files: &[FileRecord]) -> Vec<InferredEdge> {
    let mut candidates = Vec::new();

    for file in files {
        for other in files {
            if file.path == other.path {
                continue;
            }
            for rule in matching_rules(file, other) {
                trace!("{} → {} ({})", other.path, file.path, rule);
                candidates.push(InferredEdge::new(&other.path, &file.path, rule));
            }
        }
    }

    debug!(
        "Inferred {} candidate edges from {} files",
        candidates.len(),
        files.len()
    );
    candidates
}

/// Returns the rules under which `other` should be reviewed before `file`.
pub fn matching_rules(file: &FileRecord, other: &FileRecord) -> Vec<EdgeRule> {
    let file_stem = file.stem();
    let other_stem = other.stem();
    let mut rules = Vec::new();

    if file_stem == "index" && file.dir() == other.dir() && other_stem != "index" {
        rules.push(EdgeRule::Index);
    }

    if is_strict_subdir(file.dir(), other.dir()) {
        rules.push(EdgeRule::Subdirectory);
    }

    if (file_stem.contains("test") || file_stem.contains("spec"))
        && strip_test_infix(file_stem) == other_stem
    {
        rules.push(EdgeRule::TestPairing);
    }

    if (other_stem.contains("type") || other_stem.contains("interface"))
        && file_stem.contains(other_stem)
    {
        rules.push(EdgeRule::TypeAffinity);
    }

    if file_stem.contains(other_stem)
        && file_stem != other_stem
        && other_stem.chars().count() > MIN_CONTAINED_STEM_LEN
    {
        rules.push(EdgeRule::NameContainment);
    }

    rules
}

/// Whether `child` lies strictly below `parent`, by whole path segments.
///
/// The repository root is never treated as a parent directory.
fn is_strict_subdir(child: &str, parent: &str) -> bool {
    if parent == ROOT_DIR {
        return false;
    }
    child.len() > parent.len()
        && child.starts_with(parent)
        && child.as_bytes()[parent.len()] == b'/'
}

/// Removes the first `.test` or `.spec` infix from a stem.
fn strip_test_infix(stem: &str) -> String {
    let first = TEST_INFIXES
        .iter()
        .filter_map(|infix| stem.find(infix).map(|idx| (idx, infix.len())))
        .min();

    match first {
        Some((idx, len)) => format!("{}{}", &stem[..idx], &stem[idx + len..]),
        None => stem.to_string(),
    }
}
