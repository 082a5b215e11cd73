//! Static mount table (fstab) parsing
//!
//! Entries are whitespace-delimited
//! `device mount-point fstype options [dump pass]` lines; comments and blank
//! lines are skipped. A malformed entry line fails the whole table.

use super::{FsType, MountCandidate};
use crate::error::ParseError;
use std::fs;
use std::path::Path;

/// Read the static mount table, keeping only supported filesystem types.
pub fn static_mounts(path: &Path) -> Result<Vec<MountCandidate>, ParseError> {
    let content = fs::read_to_string(path).map_err(|e| ParseError::TableUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_entries(&content, path)
}

fn parse_entries(content: &str, path: &Path) -> Result<Vec<MountCandidate>, ParseError> {
    let mut mounts = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ParseError::MalformedEntry {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: format!("expected at least 4 fields, found {}", fields.len()),
            });
        }

        let fs_type = FsType::parse(fields[2]);
        if fs_type.is_supported() {
            mounts.push(MountCandidate::new(fields[1], fs_type));
        }
    }

    Ok(mounts)
}
