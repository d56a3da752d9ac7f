//! Downloading vulnerability lists.
//!
//! Lists are fetched over HTTP(S) and saved to the local paths that
//! [`crate::config::ListSource`] names. A local list younger than the refresh
//! period is left alone unless the fetch is forced. A download only replaces
//! the local file once it parses as a list with at least one entry.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use futures::future::join_all;
use tracing::{debug, info};

use crate::config::ListSource;
use crate::error::{Result, YvcError};
use crate::vlist;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// What happened to one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The local copy is recent enough; nothing was downloaded.
    Fresh,
    /// The local copy was replaced.
    Updated { entries: usize },
}

pub struct Fetcher {
    client: reqwest::Client,
    refresh: Duration,
}

impl Fetcher {
    pub fn new(refresh_hours: u64) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("yvc/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            refresh: Duration::from_secs(refresh_hours.saturating_mul(3600)),
        }
    }

    /// Refreshes a single list.
    pub async fn fetch(&self, source: &ListSource, force: bool) -> Result<FetchOutcome> {
        if !force && is_fresh(&source.path, self.refresh) {
            debug!(path = %source.path.display(), "local list is fresh, skipping download");
            return Ok(FetchOutcome::Fresh);
        }

        info!(url = %source.url, "fetching vulnerability list");
        let body = self.download(&source.url).await?;
        let entries = validate(&body, &source.url)?;
        write_atomically(&source.path, &body)?;
        info!(path = %source.path.display(), entries, "vulnerability list updated");

        Ok(FetchOutcome::Updated { entries })
    }

    /// Refreshes all lists concurrently. Results line up with `sources`.
    pub async fn fetch_all(&self, sources: &[ListSource], force: bool) -> Vec<Result<FetchOutcome>> {
        join_all(sources.iter().map(|source| self.fetch(source, force))).await
    }

    async fn download(&self, url: &str) -> Result<String> {
        let fetch_error = |e: reqwest::Error| YvcError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(fetch_error)?;
        let response = response.error_for_status().map_err(fetch_error)?;
        response.text().await.map_err(fetch_error)
    }
}

/// Whether the file at `path` exists and was modified within `ttl`.
fn is_fresh(path: &Path, ttl: Duration) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };
    match SystemTime::now().duration_since(modified) {
        Ok(elapsed) => elapsed <= ttl,
        // Modified in the future; treat as just written.
        Err(_) => true,
    }
}

/// Counts the entries in a downloaded list, rejecting lists with none.
fn validate(body: &str, source: &str) -> Result<usize> {
    let entries = vlist::parse_list(body, source).len();
    if entries == 0 {
        return Err(YvcError::EmptyList(source.to_string()));
    }
    Ok(entries)
}

/// Writes next to `path` first and renames over it, so readers never see a
/// partial list.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| YvcError::io(parent, e))?;
        }
    }

    let mut partial: OsString = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    fs::write(&partial, content).map_err(|e| YvcError::io(&partial, e))?;
    fs::rename(&partial, path).map_err(|e| YvcError::io(path, e))
}
