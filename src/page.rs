//! Host page adapter.
//!
//! Finds the container element with a given `id` in an HTML document, hands
//! out its current content as a [`Container`] render target, and splices the
//! rendered children back in. Everything outside the container's inner HTML
//! is left byte-for-byte untouched.
//!
//! This is a targeted scanner, not an HTML parser: it matches a quoted
//! `id="…"` attribute inside a start tag and balances same-named tags to find
//! the closing one. That is enough for the hand-written layout pages this
//! tool writes into.
//!
//! Matches inside `<!-- … -->` comments are skipped. Raw text elements are
//! not: an `id="x"` written as markup inside `<script>` or `<style>` text can
//! still be taken for the container, so keep such strings out of host pages.

use crate::render::{Container, RenderTarget};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Output element with id \"{0}\" not found")]
    MissingRenderTarget(String),
}

/// Byte range of a container's inner HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

/// An HTML document holding the render target.
#[derive(Debug, Clone)]
pub struct HostPage {
    html: String,
}

impl HostPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn read(path: &Path) -> Result<Self, PageError> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    pub fn write(&self, path: &Path) -> Result<(), PageError> {
        fs::write(path, &self.html)?;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn has_container(&self, id: &str) -> bool {
        locate(&self.html, id).is_some()
    }

    /// The element with `id` as a render target holding its current content.
    pub fn container(&self, id: &str) -> Result<Container, PageError> {
        let span = locate(&self.html, id)
            .ok_or_else(|| PageError::MissingRenderTarget(id.to_string()))?;
        Ok(Container::with_content(id, &self.html[span.start..span.end]))
    }

    /// Replace the element's inner HTML with the container's children.
    pub fn fill(&mut self, container: &Container) -> Result<(), PageError> {
        let id = container.id();
        let span =
            locate(&self.html, id).ok_or_else(|| PageError::MissingRenderTarget(id.to_string()))?;
        self.html
            .replace_range(span.start..span.end, &container.inner_html());
        Ok(())
    }
}

fn locate(html: &str, id: &str) -> Option<Span> {
    if id.is_empty() {
        return None;
    }
    let lower = html.to_ascii_lowercase();
    for quote in ['"', '\''] {
        let needle = format!("id={quote}{id}{quote}");
        let mut from = 0;
        while let Some(rel) = html[from..].find(&needle) {
            let at = from + rel;
            from = at + needle.len();
            if in_comment(html, at) {
                continue;
            }
            if let Some(span) = element_span(html, &lower, at) {
                return Some(span);
            }
        }
    }
    None
}

/// Inner span of the element whose start tag holds the attribute at `attr_at`.
fn element_span(html: &str, lower: &str, attr_at: usize) -> Option<Span> {
    // `data-id="x"` or text content mentioning id="x" must not match.
    if !html[..attr_at].ends_with(|c: char| c.is_ascii_whitespace()) {
        return None;
    }
    let open = html[..attr_at].rfind('<')?;
    if html[open..attr_at].contains('>') {
        return None;
    }
    let tag: String = lower[open + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if tag.is_empty() {
        return None;
    }

    let open_end = attr_at + html[attr_at..].find('>')?;
    if html[..open_end].ends_with('/') {
        return None;
    }
    let start = open_end + 1;

    let open_pat = format!("<{tag}");
    let close_pat = format!("</{tag}");
    let mut pos = start;
    let mut depth = 1usize;
    loop {
        let close = pos + lower[pos..].find(&close_pat)?;
        match lower[pos..].find(&open_pat).map(|p| p + pos) {
            Some(o) if o < close => {
                let after = o + open_pat.len();
                if is_tag_boundary(lower, after) {
                    depth += 1;
                }
                pos = after;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(Span { start, end: close });
                }
                pos = close + close_pat.len();
            }
        }
    }
}

/// Whether byte `at` lies inside an unclosed `<!--` opened before it.
fn in_comment(html: &str, at: usize) -> bool {
    match html[..at].rfind("<!--") {
        Some(open) => !html[open + 4..at].contains("-->"),
        None => false,
    }
}

fn is_tag_boundary(lower: &str, at: usize) -> bool {
    lower[at..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_whitespace() || c == '>' || c == '/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::html;

    const PAGE: &str = r#"<html><body>
<nav id="menu"><a href="/">Home</a></nav>
<div class="sidebar" id="sidebar_container">old <div>nested</div> content</div>
<footer>done</footer>
</body></html>"#;

    #[test]
    fn finds_container_content() {
        let page = HostPage::new(PAGE);
        let container = page.container("sidebar_container").unwrap();
        assert_eq!(container.inner_html(), "old <div>nested</div> content");
    }

    #[test]
    fn missing_container_is_an_error() {
        let page = HostPage::new(PAGE);
        assert!(!page.has_container("sitemap-links"));
        assert!(matches!(
            page.container("sitemap-links"),
            Err(PageError::MissingRenderTarget(id)) if id == "sitemap-links"
        ));
    }

    #[test]
    fn attribute_must_belong_to_a_tag() {
        let page = HostPage::new(r#"<p data-id="x">id="x" in text</p><span id="x">ok</span>"#);
        assert_eq!(page.container("x").unwrap().inner_html(), "ok");
    }

    #[test]
    fn commented_out_container_is_ignored() {
        let page = HostPage::new(
            r#"<!-- <div id="x">old</div> --><div id="x">live</div>"#,
        );
        assert_eq!(page.container("x").unwrap().inner_html(), "live");

        let only_comment = HostPage::new(r#"<!-- <div id="x">old</div> -->"#);
        assert!(!only_comment.has_container("x"));
    }

    #[test]
    fn single_quoted_id() {
        let page = HostPage::new("<ul id='links'><li>a</li></ul>");
        assert_eq!(page.container("links").unwrap().inner_html(), "<li>a</li>");
    }

    #[test]
    fn self_closing_element_is_not_a_container() {
        let page = HostPage::new(r#"<div id="x"/>"#);
        assert!(!page.has_container("x"));
    }

    #[test]
    fn fill_replaces_only_inner_html() {
        let mut page = HostPage::new(PAGE);
        let mut container = page.container("sidebar_container").unwrap();
        container.clear();
        container.append(html! { ul { li { "new" } } });
        page.fill(&container).unwrap();

        let out = page.as_str();
        assert!(out.contains(
            r#"<div class="sidebar" id="sidebar_container"><ul><li>new</li></ul></div>"#
        ));
        assert!(out.contains(r#"<nav id="menu"><a href="/">Home</a></nav>"#));
        assert!(out.contains("<footer>done</footer>"));
        assert!(!out.contains("nested"));
    }

    #[test]
    fn uppercase_tags_balance() {
        let page = HostPage::new(r#"<DIV id="x"><div>a</DIV>b</div>"#);
        assert_eq!(page.container("x").unwrap().inner_html(), "<div>a</DIV>b");
    }

    #[test]
    fn read_and_write_roundtrip_through_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        fs::write(&path, PAGE).unwrap();

        let mut page = HostPage::read(&path).unwrap();
        let mut container = page.container("sidebar_container").unwrap();
        container.clear();
        page.fill(&container).unwrap();
        page.write(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#"id="sidebar_container"></div>"#));
    }
}
