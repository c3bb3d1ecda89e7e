//! Advisory review output derived from the changed-file set.
//!
//! Two independent views sit next to the dependency graph: flags that apply
//! to the change as a whole, and a flat review order that ranks files by
//! kind. The flat order needs no edges, so it works even when the graph has
//! none.

use crate::file::FileRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A reminder shown alongside the graph, e.g. "check test coverage".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFlag {
    pub flag: String,
    pub description: String,
}

impl ReviewFlag {
    fn new(flag: &str, description: &str) -> Self {
        Self {
            flag: flag.to_string(),
            description: description.to_string(),
        }
    }
}

/// Returns the review flags that apply to `files`, in a fixed order.
pub fn review_flags(files: &[FileRecord]) -> Vec<ReviewFlag> {
    let mut flags = Vec::new();

    if files
        .iter()
        .any(|f| f.path.contains("test") || f.path.contains("spec"))
    {
        flags.push(ReviewFlag::new(
            "Test Coverage",
            "Ensure new/modified code has appropriate test coverage",
        ));
    }

    if files
        .iter()
        .any(|f| f.path.contains("config") || f.path.contains(".json"))
    {
        flags.push(ReviewFlag::new(
            "Configuration Changes",
            "Verify configuration changes won't break existing functionality",
        ));
    }

    if files
        .iter()
        .any(|f| f.path.ends_with(".ts") || f.path.ends_with(".tsx"))
    {
        flags.push(ReviewFlag::new(
            "Type Safety",
            "Check TypeScript types are properly defined and used",
        ));
    }

    flags
}

/// One file in the flat review order, with why it sits where it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStep {
    pub filename: String,
    pub reason: String,
}

fn is_config(path: &str) -> bool {
    path.contains("config") || path.ends_with(".json") || path.ends_with(".yml")
}

fn is_types(path: &str) -> bool {
    path.contains(".d.ts") || path.contains("types")
}

fn is_index(path: &str) -> bool {
    path.contains("index.")
}

fn is_test(path: &str) -> bool {
    path.contains("test") || path.contains("spec")
}

/// Number of `/`-separated segments.
fn depth(path: &str) -> usize {
    path.split('/').count()
}

/// Orders two paths for review.
///
/// Tiers, first difference wins: config files first, then type files,
/// then shallower paths, then index files, then non-tests before tests,
/// then byte order.
fn compare_for_review(a: &str, b: &str) -> Ordering {
    is_config(b)
        .cmp(&is_config(a))
        .then_with(|| is_types(b).cmp(&is_types(a)))
        .then_with(|| depth(a).cmp(&depth(b)))
        .then_with(|| is_index(b).cmp(&is_index(a)))
        .then_with(|| is_test(a).cmp(&is_test(b)))
        .then_with(|| a.cmp(b))
}

fn reason_for(path: &str) -> &'static str {
    if is_config(path) {
        "Configuration file - review for breaking changes"
    } else if is_types(path) {
        "Type definitions - check interface changes"
    } else if is_index(path) {
        "Module entry point"
    } else if is_test(path) {
        "Test file - verify coverage"
    } else if depth(path) <= 2 {
        "Root-level file - likely core functionality"
    } else {
        "Standard file"
    }
}

/// Ranks files by kind and depth, ignoring graph edges.
pub fn review_order(files: &[FileRecord]) -> Vec<ReviewStep> {
    let mut paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    paths.sort_by(|a, b| compare_for_review(a, b));

    paths
        .into_iter()
        .map(|path| ReviewStep {
            filename: path.to_string(),
            reason: reason_for(path).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(files: &[&str]) -> Vec<String> {
        let records: Vec<FileRecord> = files.iter().map(|p| FileRecord::path_only(*p)).collect();
        review_order(&records).into_iter().map(|s| s.filename).collect()
    }

    #[test]
    fn test_config_before_types_before_rest() {
        assert_eq!(
            order(&["src/app.ts", "src/types.ts", "ci.yml", "tsconfig.json"]),
            vec!["ci.yml", "tsconfig.json", "src/types.ts", "src/app.ts"]
        );
        assert_eq!(
            order(&["src/a/b/user.ts", "global.d.ts"]),
            vec!["global.d.ts", "src/a/b/user.ts"]
        );
    }

    #[test]
    fn test_shallow_paths_first() {
        assert_eq!(
            order(&["src/a/deep.ts", "src/mid.ts", "top.ts"]),
            vec!["top.ts", "src/mid.ts", "src/a/deep.ts"]
        );
    }

    #[test]
    fn test_index_first_within_depth() {
        assert_eq!(order(&["src/app.ts", "src/index.ts"]), vec!["src/index.ts", "src/app.ts"]);
    }

    #[test]
    fn test_tests_last_within_depth() {
        assert_eq!(
            order(&["src/a.test.ts", "src/b.ts", "src/a.spec.ts"]),
            vec!["src/b.ts", "src/a.spec.ts", "src/a.test.ts"]
        );
    }

    #[test]
    fn test_alphabetical_tiebreak() {
        assert_eq!(order(&["src/b.ts", "src/a.ts"]), vec!["src/a.ts", "src/b.ts"]);
    }

    #[test]
    fn test_reasons() {
        assert_eq!(reason_for("package.json"), "Configuration file - review for breaking changes");
        assert_eq!(reason_for("vite.config.ts"), "Configuration file - review for breaking changes");
        assert_eq!(reason_for("src/types.ts"), "Type definitions - check interface changes");
        assert_eq!(reason_for("src/a/index.ts"), "Module entry point");
        assert_eq!(reason_for("src/a/b.test.ts"), "Test file - verify coverage");
        assert_eq!(reason_for("src/app.ts"), "Root-level file - likely core functionality");
        assert_eq!(reason_for("src/a/app.ts"), "Standard file");
    }

    #[test]
    fn test_review_order_keeps_every_file() {
        let records = vec![FileRecord::new("src/x.ts", 3, 1), FileRecord::new("README.md", 1, 0)];
        let steps = review_order(&records);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].filename, "README.md");
        assert_eq!(steps[0].reason, "Root-level file - likely core functionality");
        assert!(review_order(&[]).is_empty());
    }

    fn names(files: &[&str]) -> Vec<String> {
        let records: Vec<FileRecord> = files.iter().map(|p| FileRecord::path_only(*p)).collect();
        review_flags(&records).into_iter().map(|f| f.flag).collect()
    }

    #[test]
    fn test_no_flags_for_plain_files() {
        assert!(names(&["src/main.rs", "README.md"]).is_empty());
    }

    #[test]
    fn test_all_flags_in_order() {
        assert_eq!(
            names(&["src/app.tsx", "package.json", "src/app.spec.ts"]),
            vec!["Test Coverage", "Configuration Changes", "Type Safety"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(review_flags(&[]).is_empty());
    }
}
