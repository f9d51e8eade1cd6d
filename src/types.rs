//! Shared types flowing through the index pipeline.
//!
//! [`ListingEntry`] is the wire shape of one element of the listing document
//! (the output of `Get-ChildItem -Recurse | ConvertTo-Json`, or of
//! [`crate::scan`]). [`ResolvedLink`] and [`Group`] are what the pipeline
//! produces and the renderer consumes.

use serde::{Deserialize, Serialize};

/// Display key used for entries that sit directly under the site root.
pub const ROOT_GROUP: &str = "Root";

/// One file-system node as reported by the listing source.
///
/// The PowerShell dump carries dozens of extra properties per node; only the
/// three below are read; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Bare file or folder name
    #[serde(rename = "Name")]
    pub name: String,
    /// Absolute OS-native path, root marker embedded somewhere within it
    #[serde(rename = "FullName")]
    pub full_path: String,
    /// True for directories
    #[serde(rename = "PSIsContainer", default)]
    pub is_container: bool,
}

impl ListingEntry {
    pub fn file(name: &str, full_path: &str) -> Self {
        Self {
            name: name.to_string(),
            full_path: full_path.to_string(),
            is_container: false,
        }
    }

    pub fn dir(name: &str, full_path: &str) -> Self {
        Self {
            name: name.to_string(),
            full_path: full_path.to_string(),
            is_container: true,
        }
    }
}

/// A listing entry that survived filtering, ready to become a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    /// Navigable target, root-relative (`/blog/b.htm`)
    pub href: String,
    /// Visible link text
    pub label: String,
    /// Tooltip: the entry's full path as listed
    pub title: String,
    /// First-level folder, or [`ROOT_GROUP`]
    pub group_key: String,
    /// Bare file name of the underlying entry
    pub name: String,
    /// True when the root marker was missing and `href` is the raw path
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unresolved: bool,
}

/// Contiguous run of links sharing one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub key: String,
    pub links: Vec<ResolvedLink>,
}

impl Group {
    /// Header text is omitted for the single unnamed group of a flat index.
    pub fn has_header(&self) -> bool {
        !self.key.is_empty()
    }
}
