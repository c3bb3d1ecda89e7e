//! Branch colors.
//!
//! Each branch takes one hue, cycling through the palette. Inside a branch
//! the shade darkens with depth and stops at the darkest shade.

use serde::{Deserialize, Serialize};

/// Color of nodes no traversal reached.
pub const ORPHAN_COLOR: &str = "#6b7280";

/// One hue and its shades, lightest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hue {
    pub name: String,
    pub shades: Vec<String>,
}

impl Hue {
    fn new(name: &str, shades: [&str; 5]) -> Self {
        Self {
            name: name.to_string(),
            shades: shades.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The cyclic set of hues assigned to branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    hues: Vec<Hue>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            hues: vec![
                Hue::new("blue", ["#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8", "#1e40af"]),
                Hue::new("emerald", ["#34d399", "#10b981", "#059669", "#047857", "#065f46"]),
                Hue::new("purple", ["#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9", "#5b21b6"]),
                Hue::new("amber", ["#fbbf24", "#f59e0b", "#d97706", "#b45309", "#92400e"]),
                Hue::new("rose", ["#fb7185", "#f43f5e", "#e11d48", "#be123c", "#9f1239"]),
                Hue::new("cyan", ["#22d3ee", "#06b6d4", "#0891b2", "#0e7490", "#155e75"]),
                Hue::new("pink", ["#f472b6", "#ec4899", "#db2777", "#be185d", "#9d174d"]),
            ],
        }
    }
}

impl Palette {
    /// Creates a palette from explicit hues.
    pub fn new(hues: Vec<Hue>) -> Self {
        Self { hues }
    }

    /// Number of hues before colors repeat.
    pub fn len(&self) -> usize {
        self.hues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hues.is_empty()
    }

    /// Color for a node at `level` in the branch numbered `branch_index`.
    ///
    /// Wraps over hues and clamps over shades. An empty palette or hue
    /// yields [`ORPHAN_COLOR`].
    pub fn color(&self, branch_index: usize, level: usize) -> &str {
        if self.hues.is_empty() {
            return ORPHAN_COLOR;
        }
        let shades = &self.hues[branch_index % self.hues.len()].shades;
        match shades.len() {
            0 => ORPHAN_COLOR,
            n => &shades[level.min(n - 1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_darkens_then_clamps() {
        let palette = Palette::default();
        assert_eq!(palette.color(0, 0), "#60a5fa");
        assert_eq!(palette.color(0, 1), "#3b82f6");
        assert_eq!(palette.color(0, 4), "#1e40af");
        assert_eq!(palette.color(0, 40), "#1e40af");
    }

    #[test]
    fn test_hues_wrap() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette.color(7, 0), palette.color(0, 0));
        assert_eq!(palette.color(8, 2), "#059669");
    }

    #[test]
    fn test_degenerate_palettes() {
        assert_eq!(Palette::new(Vec::new()).color(3, 1), ORPHAN_COLOR);
        let bare = Palette::new(vec![Hue {
            name: "bare".to_string(),
            shades: Vec::new(),
        }]);
        assert_eq!(bare.color(0, 0), ORPHAN_COLOR);
    }

    #[test]
    fn test_deserialize_custom_palette() {
        let json = r##"[{"name": "mono", "shades": ["#eeeeee", "#111111"]}]"##;
        let palette: Palette = serde_json::from_str(json).unwrap();
        assert_eq!(palette.color(5, 0), "#eeeeee");
        assert_eq!(palette.color(5, 9), "#111111");
    }
}
