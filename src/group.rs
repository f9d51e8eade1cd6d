//! Ordering and grouping of resolved links.
//!
//! Grouping is a single pass that opens a new [`Group`] whenever the group
//! key changes, so it is only correct on input where equal keys are already
//! adjacent. [`group_links`] therefore takes a [`SortedLinks`], which only
//! [`sort_links`] can produce.
//!
//! The default order is `(group key, relative path)`, both compared
//! case-insensitively. Keys that differ only in case (`Blog` and `blog` on a
//! case-sensitive host) are then split by exact key, so every exact key
//! stays one contiguous run. The sort is stable: links with identical keys
//! and paths keep their listing order.

use crate::types::{Group, ResolvedLink};
use std::cmp::Ordering;

/// Comparator used to order links before grouping.
pub type LinkComparator = fn(&ResolvedLink, &ResolvedLink) -> Ordering;

/// Links in comparator order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedLinks(Vec<ResolvedLink>);

impl SortedLinks {
    pub fn as_slice(&self) -> &[ResolvedLink] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<ResolvedLink> {
        self.0
    }
}

/// Compare by group key, then by root-relative path, ignoring case.
///
/// Exact key breaks ties between keys equal up to case, before the path.
pub fn by_group_then_path(a: &ResolvedLink, b: &ResolvedLink) -> Ordering {
    a.group_key
        .to_lowercase()
        .cmp(&b.group_key.to_lowercase())
        .then_with(|| a.group_key.cmp(&b.group_key))
        .then_with(|| a.href.to_lowercase().cmp(&b.href.to_lowercase()))
}

/// Stable sort of `links` with `compare`.
pub fn sort_links(mut links: Vec<ResolvedLink>, compare: LinkComparator) -> SortedLinks {
    // `sort_by` is stable; duplicates keep listing order.
    links.sort_by(compare);
    SortedLinks(links)
}

/// Split sorted links into contiguous runs of equal group key.
pub fn group_links(sorted: SortedLinks) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for link in sorted.0 {
        match groups.last_mut() {
            Some(current) if current.key == link.group_key => current.links.push(link),
            _ => groups.push(Group {
                key: link.group_key.clone(),
                links: vec![link],
            }),
        }
    }
    groups
}
