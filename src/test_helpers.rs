//! Shared test utilities.
//!
//! Fixture lookup, a one-shot HTTP responder for loader tests, and
//! extractors that flatten grouped output for compact assertions.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let entries = fixture_listing();
//! let groups = build_index(&entries, &NavConfig::default());
//! assert_eq!(group_keys(&groups), vec!["blog", "play_ground", "Root", "saved_web", "tool"]);
//! ```

use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::loader::parse_listing;
use crate::types::{Group, ListingEntry};

// =========================================================================
// Fixtures
// =========================================================================

/// Absolute path of a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// The sample PowerShell listing in `fixtures/file_structure.json`.
pub fn fixture_listing() -> Vec<ListingEntry> {
    let text = std::fs::read_to_string(fixture_path("file_structure.json")).unwrap();
    parse_listing(&text).unwrap()
}

// =========================================================================
// HTTP
// =========================================================================

/// Serve exactly one HTTP response on a random local port; returns its URL.
///
/// `status` is the status line tail, e.g. `"404 Not Found"`.
pub async fn serve_once(status: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        // Read until the end of the request headers.
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });
    format!("http://{addr}/js/sitemap/file_structure.json")
}

// =========================================================================
// Extractors
// =========================================================================

/// Group keys in render order.
pub fn group_keys(groups: &[Group]) -> Vec<&str> {
    groups.iter().map(|g| g.key.as_str()).collect()
}

/// Every href in render order, across groups.
pub fn all_hrefs(groups: &[Group]) -> Vec<&str> {
    groups
        .iter()
        .flat_map(|g| g.links.iter().map(|l| l.href.as_str()))
        .collect()
}

/// Find a group by key. Panics if not found.
pub fn find_group<'a>(groups: &'a [Group], key: &str) -> &'a Group {
    groups.iter().find(|g| g.key == key).unwrap_or_else(|| {
        let keys = group_keys(groups);
        panic!("group '{key}' not found. Available: {keys:?}")
    })
}
