//! Engine configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides:
//!
//! ```json
//! { "ignored_parents": ["package.json", "build.gradle"], "layout": { "node_sep": 60 } }
//! ```

use crate::layout::LayoutConfig;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

/// Build, lint and bundler manifests that would otherwise fan out into
/// dozens of spurious children.
pub const DEFAULT_IGNORED_PARENTS: &[&str] = &[
    "next.config.js",
    "next.config.mjs",
    "next.config.ts",
    "webpack.config.js",
    "vite.config.js",
    "vite.config.ts",
    "rollup.config.js",
    "jest.config.js",
    "jest.config.ts",
    ".eslintrc.js",
    ".prettierrc.js",
    "babel.config.js",
    "tsconfig.json",
    "package.json",
    "tailwind.config.js",
    "tailwind.config.ts",
    "postcss.config.js",
    "playwright.config.ts",
    "vitest.config.ts",
];

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Basenames whose outgoing edges are dropped.
    pub ignored_parents: Vec<String>,

    /// Branch colors.
    pub palette: Palette,

    /// Layout spacing and box sizes.
    pub layout: LayoutConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            ignored_parents: DEFAULT_IGNORED_PARENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            palette: Palette::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Parses a JSON config, filling unnamed fields with defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Replaces the ignored-parent list.
    pub fn with_ignored_parents<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_parents = names.into_iter().map(Into::into).collect();
        self
    }
}
