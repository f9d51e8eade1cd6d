//! Link list rendering.
//!
//! Materializes grouped links into the render target:
//!
//! ```html
//! <!-- static prefix, verbatim -->
//! <ul class="sitemap-list">
//!   <li class="sitemap-header">📂 blog</li>
//!   <li class="sitemap-item"><a href="/blog/b.htm" title="C:\…\blog\b.htm">b.htm</a></li>
//!   <li class="sitemap-header">📂 tool</li>
//!   <li class="sitemap-item"><a href="/tool/a.htm" title="…">a.htm</a></li>
//! </ul>
//! ```
//!
//! The renderer makes no filtering or ordering decisions and only ever
//! appends to the target. Clearing, when wanted, is the caller's job.
//!
//! Uses [maud](https://maud.lambda.xyz/); labels, hrefs and tooltips are
//! escaped, the static prefix is trusted markup from config.

use crate::config::NavConfig;
use crate::types::{Group, ResolvedLink};
use maud::{Markup, PreEscaped, html};

/// Something the index can be written into.
pub trait RenderTarget {
    /// The element id this target stands for.
    fn id(&self) -> &str;
    /// Append markup after the current content.
    fn append(&mut self, markup: Markup);
    /// Drop all current content.
    fn clear(&mut self);
}

/// In-memory stand-in for a container element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    id: String,
    children: Vec<String>,
}

impl Container {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            children: Vec::new(),
        }
    }

    /// Container pre-filled with existing markup.
    pub fn with_content(id: &str, content: &str) -> Self {
        let mut container = Self::new(id);
        if !content.is_empty() {
            container.children.push(content.to_string());
        }
        container
    }

    /// Appended fragments in order.
    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn inner_html(&self) -> String {
        self.children.concat()
    }
}

impl RenderTarget for Container {
    fn id(&self) -> &str {
        &self.id
    }

    fn append(&mut self, markup: Markup) {
        self.children.push(markup.into_string());
    }

    fn clear(&mut self) {
        self.children.clear();
    }
}

/// Presentation knobs taken from config.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub header_icon: String,
    pub list_class: String,
}

impl RenderOptions {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            header_icon: config.header_icon.clone(),
            list_class: config.list_class.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

/// Write `static_prefix` and then the grouped list into `target`.
pub fn render(
    groups: &[Group],
    target: &mut impl RenderTarget,
    static_prefix: &str,
    options: &RenderOptions,
) {
    render_prefix(target, static_prefix);
    target.append(render_list(groups, options));
}

/// Append the static prefix markup verbatim; nothing for an empty prefix.
pub fn render_prefix(target: &mut impl RenderTarget, static_prefix: &str) {
    if !static_prefix.is_empty() {
        target.append(PreEscaped(static_prefix.to_string()));
    }
}

/// Append the single visible failure indicator.
pub fn render_error(target: &mut impl RenderTarget, message: &str) {
    target.append(html! {
        p.sitemap-error role="alert" { (message) }
    });
}

/// The `<ul>` holding every header and link.
pub fn render_list(groups: &[Group], options: &RenderOptions) -> Markup {
    html! {
        ul class=(options.list_class) {
            @for group in groups {
                @if group.has_header() {
                    (render_header(&group.key, &options.header_icon))
                }
                @for link in &group.links {
                    (render_item(link))
                }
            }
        }
    }
}

fn render_header(key: &str, icon: &str) -> Markup {
    html! {
        li.sitemap-header {
            @if !icon.is_empty() {
                (icon) " "
            }
            (key)
        }
    }
}

fn render_item(link: &ResolvedLink) -> Markup {
    html! {
        li.sitemap-item {
            a href=(link.href) title=(link.title) { (link.label) }
        }
    }
}
