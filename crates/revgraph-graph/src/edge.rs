//! Edge types for the review graph.
//!
//! An edge `from → to` means "review `from` before `to`". Edges are
//! inferred from path heuristics, never from parsed imports, and each one
//! remembers which rules proposed it.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// The heuristic that proposed an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRule {
    /// `index` files come after their siblings.
    Index,

    /// Files in a subdirectory come after files in an ancestor directory.
    Subdirectory,

    /// `foo.test` / `foo.spec` come after `foo`.
    TestPairing,

    /// Files named after a `type`/`interface` file come after it.
    TypeAffinity,

    /// A file whose name contains another file's name comes after it.
    NameContainment,
}

impl std::fmt::Display for EdgeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Index => "index",
            Self::Subdirectory => "subdirectory",
            Self::TestPairing => "test_pairing",
            Self::TypeAffinity => "type_affinity",
            Self::NameContainment => "name_containment",
        };
        write!(f, "{}", s)
    }
}

/// A single rule firing, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredEdge {
    pub from: String,
    pub to: String,
    pub rule: EdgeRule,
}

impl InferredEdge {
    /// Creates a candidate edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, rule: EdgeRule) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rule,
        }
    }
}

/// A deduplicated review-order edge.
///
/// Equality and hashing only look at `(from, to)`. `rules` is provenance
/// for logs and summaries and is not part of the output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,

    #[serde(skip)]
    pub rules: Vec<EdgeRule>,
}

impl Edge {
    /// Creates an edge with no recorded provenance.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rules: Vec::new(),
        }
    }

    /// The `(from, to)` pair identifying this edge.
    pub fn key(&self) -> (&str, &str) {
        (&self.from, &self.to)
    }

    pub(crate) fn add_rule(&mut self, rule: EdgeRule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }
}

impl From<InferredEdge> for Edge {
    fn from(candidate: InferredEdge) -> Self {
        Self {
            from: candidate.from,
            to: candidate.to,
            rules: vec![candidate.rule],
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_provenance() {
        let a = Edge::from(InferredEdge::new("a.ts", "b.ts", EdgeRule::Index));
        let b = Edge::new("a.ts", "b.ts");
        assert_eq!(a, b);
        assert_ne!(a, Edge::new("b.ts", "a.ts"));
    }

    #[test]
    fn test_serializes_without_rules() {
        let edge = Edge::from(InferredEdge::new("src/util.ts", "src/index.ts", EdgeRule::Index));
        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(json, r#"{"from":"src/util.ts","to":"src/index.ts"}"#);
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(EdgeRule::TestPairing.to_string(), "test_pairing");
        assert_eq!(EdgeRule::NameContainment.to_string(), "name_containment");
    }
}
