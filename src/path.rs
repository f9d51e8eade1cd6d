//! Root-relative path resolution.
//!
//! Listing entries carry absolute, OS-flavored paths such as
//! `C:\Users\me\tribefactory-main\blog\b.htm`. The site root is located by a
//! literal marker token (the root folder's name), not by filesystem
//! inspection, so everything here is plain string work:
//!
//! ```text
//! C:\Users\me\tribefactory-main\blog\2023\b.htm
//!   normalize  → C:/Users/me/tribefactory-main/blog/2023/b.htm
//!   resolve    → /blog/2023/b.htm
//!   first level→ blog
//!   parent     → 2023
//! ```
//!
//! The marker is matched at its first occurrence anywhere in the string. A
//! path that nests a same-named folder (`…/site/x/site/…`) resolves against
//! the outer one.

/// Label used for the parent folder of entries directly under the root.
pub const SITE_ROOT_LABEL: &str = "site root";

/// Outcome of resolving a full path against the root marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Root-relative path, always starting with `/`.
    Relative(String),
    /// The path names the site root itself; no link is produced for it.
    SiteRoot,
    /// Marker not found; carries the separator-normalized full path.
    Unresolved(String),
}

impl Resolution {
    /// The path a link should point at, if any.
    pub fn href(&self) -> Option<&str> {
        match self {
            Resolution::Relative(p) | Resolution::Unresolved(p) => Some(p),
            Resolution::SiteRoot => None,
        }
    }
}

/// Convert Windows separators to `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Resolve `full_path` to a root-relative path using `root_marker`.
pub fn resolve(full_path: &str, root_marker: &str) -> Resolution {
    let normalized = normalize_separators(full_path);
    let Some(marker_pos) = normalized.find(root_marker) else {
        return Resolution::Unresolved(normalized);
    };

    // Skip the marker and the separator that follows it.
    let start = marker_pos + root_marker.len() + 1;
    if start >= normalized.len() {
        return Resolution::SiteRoot;
    }
    // `start` may land inside a multi-byte char when the marker is a prefix of
    // a longer folder name (`site` in `site-é`); such paths are not under the
    // root proper.
    match normalized.get(start..) {
        Some(rest) => Resolution::Relative(format!("/{rest}")),
        None => Resolution::Unresolved(normalized),
    }
}

/// The first path segment below the root, or `""` for files directly under it.
///
/// `/blog/2023/b.htm` → `blog`; `/index.htm` → `""`.
pub fn first_level_folder(relative: &str) -> &str {
    let parts: Vec<&str> = relative.split('/').collect();
    // ["", "blog", "b.htm"] is the shortest path that has a folder.
    if parts.len() > 2 { parts[1] } else { "" }
}

/// Name of the folder immediately containing the entry.
///
/// `/blog/2023/b.htm` → `2023`; `/index.htm` → [`SITE_ROOT_LABEL`].
pub fn parent_folder_label(relative: &str) -> &str {
    let Some(last) = relative.rfind('/') else {
        return SITE_ROOT_LABEL;
    };
    let head = &relative[..last];
    match head.rfind('/') {
        Some(prev) if !head[prev + 1..].is_empty() => &head[prev + 1..],
        _ if !head.is_empty() && !head.contains('/') => head,
        _ => SITE_ROOT_LABEL,
    }
}
