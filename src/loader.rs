//! Listing retrieval and the one-shot load lifecycle.
//!
//! ```text
//! Idle ──load()──▶ Loading ──┬──▶ Succeeded   (list rendered into the target)
//!                            └──▶ Failed      (one error indicator rendered)
//! ```
//!
//! A loader runs at most once: a second `load()` leaves the state alone and
//! returns [`LoadOutcome::Skipped`]. Failures never escape as errors; they
//! become a visible indicator in the target plus a [`LoadOutcome::Failed`]
//! carrying the typed cause. There is no retry.
//!
//! The listing location is either an `http(s)` URL, fetched with `reqwest`, or
//! a local path. Either way the whole retrieval runs under the configured
//! deadline.

use crate::config::NavConfig;
use crate::pipeline;
use crate::render::{self, RenderOptions, RenderTarget};
use crate::types::{Group, ListingEntry};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Text of the indicator shown when the listing cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Sitemap loading failed.";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Network response was not ok. HTTP status {status} (URL: {url})")]
    Status { status: u16, url: String },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Listing is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Where the listing document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    Url(String),
    File(PathBuf),
}

impl ListingSource {
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ListingSource::Url(location.to_string())
        } else {
            ListingSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for ListingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingSource::Url(url) => f.write_str(url),
            ListingSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Terminal result of a [`ListingLoader::load`] call.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The pipeline ran; these groups were rendered.
    Rendered(Vec<Group>),
    /// Retrieval or parsing failed; the error indicator was rendered.
    Failed(LoadError),
    /// The loader had already run; nothing was done.
    Skipped,
}

/// The listing document: normally an array, but a one-item PowerShell dump
/// is a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListingDocument {
    Many(Vec<ListingEntry>),
    One(ListingEntry),
}

/// Parse a listing document, tolerating a leading UTF-8 BOM.
pub fn parse_listing(text: &str) -> Result<Vec<ListingEntry>, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let entries = match serde_json::from_str(text)? {
        ListingDocument::Many(entries) => entries,
        ListingDocument::One(entry) => vec![entry],
    };
    Ok(entries)
}

/// Fetch the raw listing text from `source`.
pub async fn fetch_listing(
    client: &reqwest::Client,
    source: &ListingSource,
) -> Result<String, LoadError> {
    match source {
        ListingSource::Url(url) => {
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }
            Ok(response.text().await?)
        }
        ListingSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
    }
}

/// Drives one retrieval → pipeline → render pass.
pub struct ListingLoader {
    config: NavConfig,
    source: ListingSource,
    client: reqwest::Client,
    state: LoadState,
}

impl ListingLoader {
    pub fn new(config: NavConfig) -> Self {
        let source = ListingSource::parse(&config.listing_source);
        Self::with_source(config, source)
    }

    /// Loader reading from `source` instead of `config.listing_source`.
    pub fn with_source(config: NavConfig, source: ListingSource) -> Self {
        Self {
            config,
            source,
            client: reqwest::Client::new(),
            state: LoadState::Idle,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn source(&self) -> &ListingSource {
        &self.source
    }

    /// Retrieve the listing and render the index into `target`.
    ///
    /// The target is cleared first. On success it receives the static prefix
    /// and the list; on failure the static prefix and one error indicator.
    pub async fn load(&mut self, target: &mut impl RenderTarget) -> LoadOutcome {
        if self.state != LoadState::Idle {
            warn!(state = ?self.state, "listing load already started, ignoring");
            return LoadOutcome::Skipped;
        }
        self.state = LoadState::Loading;
        info!(source = %self.source, container = target.id(), "loading listing");

        target.clear();
        match self.retrieve().await {
            Ok(entries) => {
                let groups = pipeline::build_index(&entries, &self.config);
                render::render(
                    &groups,
                    target,
                    &self.config.static_prefix,
                    &RenderOptions::from_config(&self.config),
                );
                let links: usize = groups.iter().map(|g| g.links.len()).sum();
                info!(links, groups = groups.len(), "generated grouped links");
                self.state = LoadState::Succeeded;
                LoadOutcome::Rendered(groups)
            }
            Err(err) => {
                error!(source = %self.source, "sitemap fetch error: {err}");
                render::render_prefix(target, &self.config.static_prefix);
                render::render_error(target, LOAD_FAILED_MESSAGE);
                self.state = LoadState::Failed;
                LoadOutcome::Failed(err)
            }
        }
    }

    async fn retrieve(&self) -> Result<Vec<ListingEntry>, LoadError> {
        let deadline = self.config.fetch_timeout();
        let text = tokio::time::timeout(deadline, fetch_listing(&self.client, &self.source))
            .await
            .map_err(|_| LoadError::Timeout(deadline))??;
        debug!(bytes = text.len(), "listing retrieved");
        parse_listing(&text)
    }
}
