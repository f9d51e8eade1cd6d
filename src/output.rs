//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! ## Check
//!
//! ```text
//! blog (2 links)
//!     2023/b.htm → /blog/2023/b.htm
//!     b.htm → /blog/b.htm
//! Root (1 link)
//!     index.htm → /index.htm
//!
//! 3 links in 2 groups
//! ```
//!
//! Links whose path lacked the root marker are flagged `(unresolved)`.

use crate::types::{Group, ListingEntry};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Grouped index as an indented outline with a totals line.
pub fn format_index(groups: &[Group]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        let title = if group.has_header() {
            group.key.as_str()
        } else {
            "(all)"
        };
        lines.push(format!("{} ({})", title, count(group.links.len(), "link", "links")));
        for link in &group.links {
            let mut line = format!("{}{} → {}", indent(1), link.label, link.href);
            if link.unresolved {
                line.push_str(" (unresolved)");
            }
            lines.push(line);
        }
    }
    let total: usize = groups.iter().map(|g| g.links.len()).sum();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} in {}",
        count(total, "link", "links"),
        count(groups.len(), "group", "groups")
    ));
    lines
}

pub fn print_index(groups: &[Group]) {
    for line in format_index(groups) {
        println!("{}", line);
    }
}

/// One-line summary of a generated listing.
pub fn format_scan(entries: &[ListingEntry], destination: &str) -> Vec<String> {
    let dirs = entries.iter().filter(|e| e.is_container).count();
    vec![format!(
        "Listed {} ({}, {}) → {}",
        count(entries.len(), "entry", "entries"),
        count(dirs, "directory", "directories"),
        count(entries.len() - dirs, "file", "files"),
        destination
    )]
}

pub fn print_scan(entries: &[ListingEntry], destination: &str) {
    for line in format_scan(entries, destination) {
        println!("{}", line);
    }
}
