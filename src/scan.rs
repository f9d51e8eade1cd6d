//! Listing document generation.
//!
//! Produces the same document a Windows deploy step would get from
//!
//! ```text
//! Get-ChildItem -Recurse | Select-Object Name, FullName, PSIsContainer | ConvertTo-Json
//! ```
//!
//! so sites built on other platforms can ship a `file_structure.json` too.
//! Every node below the root is listed (the root itself is not), with its
//! absolute path, in file-name order per directory. Hidden entries
//! (dot-prefixed) are skipped along with their contents.

use crate::types::ListingEntry;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// List every non-hidden node under `root`.
pub fn scan_listing(root: &Path) -> Result<Vec<ListingEntry>, ScanError> {
    let root = fs::canonicalize(root)?;
    let mut entries = Vec::new();
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry?;
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            full_path: entry.path().to_string_lossy().to_string(),
            is_container: entry.file_type().is_dir(),
        });
    }
    Ok(entries)
}

/// Serialize a listing as pretty-printed JSON.
pub fn listing_json(entries: &[ListingEntry]) -> Result<String, ScanError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
