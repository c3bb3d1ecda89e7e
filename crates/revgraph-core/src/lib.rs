//! Revgraph Core - Changed-file model for review graphs
//!
//! This crate holds the input side of revgraph: the `FileRecord` describing
//! one changed file, the path helpers every inference rule is built on, and
//! parsers that turn provider output (JSON or `git diff --numstat`) into an
//! ordered file list.
//!
//! Input order matters downstream. Parsers never reorder records.
//!
//! # Example
//!
//! ```
//! use revgraph_core::{parse_file_list, FileRecord};
//!
//! let files = parse_file_list("3\t1\tsrc/index.ts\n10\t0\tsrc/util.ts\n").unwrap();
//! assert_eq!(files[0], FileRecord::new("src/index.ts", 3, 1));
//! assert_eq!(files[1].stem(), "util");
//! ```

mod error;
mod file;
mod input;
mod review;

pub use error::{InputError, Result};
pub use file::{basename, file_stem, parent_dir, FileRecord, ROOT_DIR};
pub use input::{
    load_file_list, parse_file_list, parse_json, parse_numstat, parse_path_list, read_file_list,
};
pub use review::{review_flags, review_order, ReviewFlag, ReviewStep};
