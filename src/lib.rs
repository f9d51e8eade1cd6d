//! # sitemap-nav
//!
//! Renders a site navigation index from a flat, machine-generated directory
//! listing. Non-content files are hidden, paths are made root-relative, and
//! the remaining links are ordered and grouped by top-level folder.
//!
//! # Architecture: One-Shot Pipeline
//!
//! ```text
//! listing (JSON) → filter → resolve → sort → group → render → container
//! ```
//!
//! Everything between loading and rendering is a pure function from entries to
//! [`types::Group`]s ([`pipeline::build_index`]), so ordering and grouping
//! rules are unit-tested without a page. The render target is a trait
//! ([`render::RenderTarget`]); [`page::HostPage`] adapts a real HTML document
//! to it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`path`] | Root-marker path resolution, folder labels |
//! | [`filter`] | Container and excluded-suffix filtering |
//! | [`group`] | Stable ordering and contiguous grouping |
//! | [`pipeline`] | The pure transform with injectable strategies |
//! | [`render`] | Maud list markup, render target trait |
//! | [`page`] | Locates the container element in a host HTML page |
//! | [`loader`] | One-shot listing retrieval (URL or file) and error display |
//! | [`scan`] | Generates a listing document from a local directory |
//! | [`config`] | `sitemap.toml` loading, merging, validation |
//! | [`types`] | Listing entries, resolved links, groups |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Marker-Based Root Detection
//!
//! The listing is produced on the author's machine, so full paths point at
//! wherever the checkout lives (`C:\Users\…\tribefactory-main\blog\b.htm`).
//! The site root is found by the folder name alone, at its first occurrence.
//! An entry without the marker is still linked, to its raw normalized path,
//! and a warning is logged: one odd entry never blanks the whole index.
//!
//! ## Sort Before Group
//!
//! Groups are built in a single pass that starts a new group whenever the key
//! changes. That is only correct on sorted input, so grouping takes a
//! [`group::SortedLinks`] which only [`group::sort_links`] produces.
//!
//! ## Failures Are Rendered, Not Raised
//!
//! A failed retrieval leaves one visible error indicator in the container and
//! returns a typed [`loader::LoadError`] inside the outcome. Nothing is
//! retried.

pub mod config;
pub mod filter;
pub mod group;
pub mod loader;
pub mod output;
pub mod page;
pub mod path;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
