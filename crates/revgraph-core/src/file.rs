//! The changed-file record and the path helpers built around it.
//!
//! Paths are forward-slash separated and compared as plain strings. Nothing
//! here touches the filesystem.

use serde::{Deserialize, Serialize};

/// Directory reported for files that live at the repository root.
pub const ROOT_DIR: &str = ".";

/// One changed file in a review request.
///
/// Accepts the hosting provider's shape on input: `filename` is read as
/// `path`, and fields such as `status` or `patch` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// Repository-relative path. Unique within one file list.
    #[serde(alias = "filename")]
    pub path: String,

    /// Lines added.
    #[serde(default)]
    pub additions: u32,

    /// Lines removed.
    #[serde(default)]
    pub deletions: u32,
}

impl FileRecord {
    /// Creates a record.
    pub fn new(path: impl Into<String>, additions: u32, deletions: u32) -> Self {
        Self {
            path: path.into(),
            additions,
            deletions,
        }
    }

    /// Creates a record with no line statistics.
    pub fn path_only(path: impl Into<String>) -> Self {
        Self::new(path, 0, 0)
    }

    /// The last path segment, extension included.
    pub fn basename(&self) -> &str {
        basename(&self.path)
    }

    /// The basename without its final extension.
    pub fn stem(&self) -> &str {
        file_stem(&self.path)
    }

    /// The directory containing this file.
    pub fn dir(&self) -> &str {
        parent_dir(&self.path)
    }
}

/// Returns the last `/`-separated segment of `path`.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Returns the basename of `path` with its final extension removed.
///
/// A leading dot does not start an extension, so `.eslintrc` stays whole
/// while `.eslintrc.js` becomes `.eslintrc`.
pub fn file_stem(path: &str) -> &str {
    let name = basename(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Returns everything before the last `/`, or [`ROOT_DIR`] for top-level files.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ROOT_DIR,
    }
}
