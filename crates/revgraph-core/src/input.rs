//! Parsers for changed-file lists.
//!
//! Three shapes are accepted, all order-preserving:
//! - JSON: an array of records, or an object with a `files` array
//! - `git diff --numstat` output
//! - one path per line

use crate::error::{InputError, Result};
use crate::file::FileRecord;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonFileList {
    Bare(Vec<FileRecord>),
    Wrapped { files: Vec<FileRecord> },
}

/// Parses a file list, detecting its format from the content.
///
/// Text starting with `[` or `{` is JSON. Text whose first non-blank line
/// has tab-separated counts is numstat. Anything else is a path list.
pub fn parse_file_list(text: &str) -> Result<Vec<FileRecord>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return parse_json(text);
    }

    let looks_like_numstat = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.splitn(3, '\t').count() == 3)
        .unwrap_or(false);

    if looks_like_numstat {
        parse_numstat(text)
    } else {
        Ok(parse_path_list(text))
    }
}

/// Reads a file list to the end of `reader` and parses it.
pub fn read_file_list(mut reader: impl Read) -> Result<Vec<FileRecord>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_file_list(&text)
}

/// Reads and parses the file list stored at `path`.
pub fn load_file_list(path: &Path) -> Result<Vec<FileRecord>> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file_list(&text)
}

/// Parses a JSON file list.
pub fn parse_json(text: &str) -> Result<Vec<FileRecord>> {
    let files = match serde_json::from_str::<JsonFileList>(text)? {
        JsonFileList::Bare(files) => files,
        JsonFileList::Wrapped { files } => files,
    };

    if let Some(index) = files.iter().position(|f| f.path.is_empty()) {
        return Err(InputError::EmptyPath { index });
    }

    debug!("Parsed {} file records from JSON", files.len());
    Ok(files)
}

/// Parses `git diff --numstat` output.
///
/// Binary files report `-` for both counts and are read as zero.
pub fn parse_numstat(text: &str) -> Result<Vec<FileRecord>> {
    let mut files = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.splitn(3, '\t');
        let (Some(added), Some(removed), Some(path)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(InputError::Numstat {
                line: line_no,
                content: line.to_string(),
            });
        };

        let path = path.trim();
        if path.is_empty() {
            return Err(InputError::Numstat {
                line: line_no,
                content: line.to_string(),
            });
        }

        files.push(FileRecord::new(
            path,
            parse_count(added, line_no)?,
            parse_count(removed, line_no)?,
        ));
    }

    debug!("Parsed {} file records from numstat", files.len());
    Ok(files)
}

/// Parses one path per line. Blank lines are skipped.
pub fn parse_path_list(text: &str) -> Vec<FileRecord> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(FileRecord::path_only)
        .collect()
}

fn parse_count(value: &str, line: usize) -> Result<u32> {
    let value = value.trim();
    if value == "-" {
        return Ok(0);
    }
    value.parse().map_err(|_| InputError::Count {
        line,
        value: value.to_string(),
    })
}
