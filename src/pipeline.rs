//! The pure listing → index transform.
//!
//! ```text
//! entries ─▶ filter ─▶ resolve ─▶ sort ─▶ group ─▶ Vec<Group>
//! ```
//!
//! No I/O happens here: the loader feeds entries in and the renderer takes
//! groups out. Three decisions vary between deployments and are injected
//! through [`Strategies`]:
//!
//! - **group key**: which folder a link is filed under
//! - **label**: the visible text of a link
//! - **comparator**: the order links appear in before grouping
//!
//! [`Strategies::for_config`] picks the ones a [`NavConfig`] asks for.

use crate::config::{GroupBy, LabelStyle, NavConfig};
use crate::filter::ExclusionSet;
use crate::group::{self, LinkComparator};
use crate::path::{self, Resolution};
use crate::types::{Group, ListingEntry, ROOT_GROUP, ResolvedLink};
use tracing::{debug, warn};

/// Derives the group key from a root-relative path.
pub type GroupKeyFn = fn(&str) -> String;

/// Composes the visible label from a root-relative path and the file name.
pub type LabelFn = fn(&str, &str) -> String;

/// Injectable pipeline decisions.
#[derive(Debug, Clone, Copy)]
pub struct Strategies {
    pub group_key: GroupKeyFn,
    pub label: LabelFn,
    pub compare: LinkComparator,
}

impl Default for Strategies {
    fn default() -> Self {
        Self {
            group_key: top_folder_key,
            label: name_label,
            compare: group::by_group_then_path,
        }
    }
}

impl Strategies {
    pub fn for_config(config: &NavConfig) -> Self {
        Self {
            group_key: match config.group_by {
                GroupBy::TopFolder => top_folder_key,
                GroupBy::Flat => flat_key,
            },
            label: match config.label_style {
                LabelStyle::Name => name_label,
                LabelStyle::ParentAndName => parent_and_name_label,
            },
            ..Self::default()
        }
    }
}

/// First-level folder, with [`ROOT_GROUP`] for files directly under the root.
pub fn top_folder_key(relative: &str) -> String {
    match path::first_level_folder(relative) {
        "" => ROOT_GROUP.to_string(),
        folder => folder.to_string(),
    }
}

/// Everything in one unnamed group.
pub fn flat_key(_relative: &str) -> String {
    String::new()
}

pub fn name_label(_relative: &str, name: &str) -> String {
    name.to_string()
}

/// `2023/b.htm`, or `site root/index.htm` for files directly under the root.
pub fn parent_and_name_label(relative: &str, name: &str) -> String {
    format!("{}/{}", path::parent_folder_label(relative), name)
}

/// Build the grouped index using the strategies `config` selects.
pub fn build_index(entries: &[ListingEntry], config: &NavConfig) -> Vec<Group> {
    build_index_with(entries, config, &Strategies::for_config(config))
}

/// Build the grouped index with explicit strategies.
pub fn build_index_with(
    entries: &[ListingEntry],
    config: &NavConfig,
    strategies: &Strategies,
) -> Vec<Group> {
    let exclusions = ExclusionSet::new(&config.excluded_extensions);
    let links: Vec<ResolvedLink> = entries
        .iter()
        .filter(|e| exclusions.is_eligible(e))
        .filter_map(|e| resolve_entry(e, &config.root_marker, strategies))
        .collect();

    debug!(
        total = entries.len(),
        eligible = links.len(),
        "filtered listing"
    );

    let sorted = group::sort_links(links, strategies.compare);
    group::group_links(sorted)
}

/// Turn one eligible entry into a link, or `None` for the site root itself.
pub fn resolve_entry(
    entry: &ListingEntry,
    root_marker: &str,
    strategies: &Strategies,
) -> Option<ResolvedLink> {
    let resolution = path::resolve(&entry.full_path, root_marker);
    let unresolved = matches!(resolution, Resolution::Unresolved(_));
    if unresolved {
        warn!(
            path = %entry.full_path,
            marker = root_marker,
            "root marker not found, linking to the raw path"
        );
    }
    let href = resolution.href()?.to_string();

    Some(ResolvedLink {
        label: (strategies.label)(&href, &entry.name),
        title: entry.full_path.clone(),
        group_key: (strategies.group_key)(&href),
        name: entry.name.clone(),
        href,
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{all_hrefs, find_group, fixture_listing, group_keys};
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    /// Run `f` with warnings captured as plain text.
    fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    fn config() -> NavConfig {
        NavConfig {
            excluded_extensions: vec![".css".to_string(), ".png".to_string()],
            ..NavConfig::default()
        }
    }

    fn hrefs(groups: &[Group]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|g| g.links.iter().map(|l| l.href.as_str()).collect())
            .collect()
    }

    #[test]
    fn groups_in_key_order_with_sorted_members() {
        let entries = vec![
            ListingEntry::file("z.htm", "/s/tribefactory-main/tool/z.htm"),
            ListingEntry::file("index.htm", "/s/tribefactory-main/index.htm"),
            ListingEntry::file("b.htm", "/s/tribefactory-main/blog/b.htm"),
            ListingEntry::file("A.htm", "/s/tribefactory-main/blog/2023/A.htm"),
            ListingEntry::file("a.htm", "/s/tribefactory-main/tool/a.htm"),
        ];
        let groups = build_index(&entries, &config());
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["blog", "Root", "tool"]);
        assert_eq!(
            hrefs(&groups),
            vec![
                vec!["/blog/2023/A.htm", "/blog/b.htm"],
                vec!["/index.htm"],
                vec!["/tool/a.htm", "/tool/z.htm"],
            ]
        );
    }

    #[test]
    fn fixture_listing_with_stock_config() {
        let groups = build_index(&fixture_listing(), &NavConfig::default());
        assert_eq!(
            group_keys(&groups),
            vec!["blog", "play_ground", "Root", "saved_web", "tool"]
        );
        assert_eq!(
            all_hrefs(&groups),
            vec![
                "/blog/2023/A.htm",
                "/blog/b.htm",
                "/play_ground/test.htm",
                "/index.htm",
                "/saved_web/page.htm",
                "/tool/a.htm",
                "/tool/Calc.html",
            ]
        );
        let tool = find_group(&groups, "tool");
        assert_eq!(
            tool.links[1].title,
            r"C:\Users\tribe\Documents\GitHub\tribefactory-main\tool\Calc.html"
        );
        assert_eq!(tool.links[1].label, "Calc.html");
    }

    #[test]
    fn containers_and_excluded_files_are_dropped() {
        let entries = vec![
            ListingEntry::dir("blog", "/s/tribefactory-main/blog"),
            ListingEntry::file("style.css", "/s/tribefactory-main/style.css"),
            ListingEntry::file("LOGO.PNG", "/s/tribefactory-main/img/LOGO.PNG"),
        ];
        assert!(build_index(&entries, &config()).is_empty());
    }

    #[test]
    fn site_root_entry_produces_no_link() {
        // A listing that flags the root as a file (hand-edited) still yields nothing.
        let entries = vec![ListingEntry::file(
            "tribefactory-main",
            "/s/tribefactory-main",
        )];
        assert!(build_index(&entries, &config()).is_empty());
    }

    #[test]
    fn unresolved_entry_is_kept() {
        let entries = vec![ListingEntry::file("p.htm", r"C:\other\p.htm")];
        let groups = build_index(&entries, &config());
        let link = &groups[0].links[0];
        assert_eq!(link.href, "C:/other/p.htm");
        assert!(link.unresolved);
        assert_eq!(link.title, r"C:\other\p.htm");
    }

    #[test]
    fn unresolved_entry_logs_one_warning_naming_the_path() {
        let entries = vec![
            ListingEntry::file("p.htm", "/backup/site/p.htm"),
            ListingEntry::file("b.htm", "/s/tribefactory-main/blog/b.htm"),
        ];
        let (groups, logs) = capture_logs(|| build_index(&entries, &config()));

        assert_eq!(all_hrefs(&groups).len(), 2);
        assert_eq!(logs.matches("WARN").count(), 1, "{logs}");
        assert!(logs.contains("/backup/site/p.htm"), "{logs}");
        assert!(logs.contains("root marker not found"), "{logs}");
    }

    #[test]
    fn resolved_entries_log_no_warning() {
        let entries = vec![ListingEntry::file("b.htm", "/s/tribefactory-main/blog/b.htm")];
        let (_, logs) = capture_logs(|| build_index(&entries, &config()));
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn parent_and_name_labels() {
        let config = NavConfig {
            label_style: LabelStyle::ParentAndName,
            ..config()
        };
        let entries = vec![
            ListingEntry::file("b.htm", "/s/tribefactory-main/blog/2023/b.htm"),
            ListingEntry::file("index.htm", "/s/tribefactory-main/index.htm"),
        ];
        let groups = build_index(&entries, &config);
        let labels: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.links.iter().map(|l| l.label.as_str()))
            .collect();
        assert_eq!(labels, vec!["2023/b.htm", "site root/index.htm"]);
    }

    #[test]
    fn flat_grouping_yields_single_headerless_group() {
        let config = NavConfig {
            group_by: GroupBy::Flat,
            ..config()
        };
        let entries = vec![
            ListingEntry::file("a.htm", "/s/tribefactory-main/tool/a.htm"),
            ListingEntry::file("b.htm", "/s/tribefactory-main/blog/b.htm"),
        ];
        let groups = build_index(&entries, &config);
        assert_eq!(groups.len(), 1);
        assert!(!groups[0].has_header());
        assert_eq!(hrefs(&groups), vec![vec!["/blog/b.htm", "/tool/a.htm"]]);
    }

    #[test]
    fn custom_comparator_is_honored() {
        fn by_name_desc(a: &ResolvedLink, b: &ResolvedLink) -> std::cmp::Ordering {
            b.name.cmp(&a.name)
        }
        let strategies = Strategies {
            group_key: flat_key,
            compare: by_name_desc,
            ..Strategies::default()
        };
        let entries = vec![
            ListingEntry::file("a.htm", "/s/tribefactory-main/a.htm"),
            ListingEntry::file("c.htm", "/s/tribefactory-main/c.htm"),
            ListingEntry::file("b.htm", "/s/tribefactory-main/b.htm"),
        ];
        let groups = build_index_with(&entries, &config(), &strategies);
        assert_eq!(
            hrefs(&groups),
            vec![vec!["/c.htm", "/b.htm", "/a.htm"]]
        );
    }
}
