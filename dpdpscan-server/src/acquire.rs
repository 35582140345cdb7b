//! Best-effort raw-content acquisition for repository scans.
//!
//! Repositories are not guaranteed to expose a tree-listing API without
//! authentication, so the acquirer probes a curated allowlist of
//! conventional file names on a short list of branches and concatenates
//! whatever comes back. Per-file failures are skipped; only a fully empty
//! result is treated as fatal by the caller.

use std::time::Duration;

use dpdpscan_core::ContentBlob;
use log::debug;
use reqwest::blocking::Client;

/// Branches probed, in order.
pub const CANDIDATE_BRANCHES: [&str; 2] = ["main", "master"];

/// Conventional file names probed on each branch: entry points,
/// configuration, and dependency manifests.
pub const CANDIDATE_FILES: [&str; 14] = [
    "main.py",
    "app.py",
    "settings.py",
    "config.py",
    "index.js",
    "app.js",
    "server.js",
    "routes.js",
    "models.py",
    "views.py",
    "requirements.txt",
    "package.json",
    ".env.example",
    "docker-compose.yml",
];

/// Per-file fetch timeout.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// A raw-content host that can serve individual repository files.
pub trait RawHost {
    /// Fetch one file from a repository branch. Returns `None` on any
    /// failure (timeout, non-200, transport error).
    fn fetch_file(&self, owner: &str, repo: &str, branch: &str, file: &str) -> Option<String>;
}

/// Raw-content client backed by a blocking HTTP client.
#[derive(Debug, Clone)]
pub struct HttpRawHost {
    base_url: String,
    client: Client,
}

impl HttpRawHost {
    /// Build a raw-content client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("DPDPSCAN_RAW_HOST")
            .unwrap_or_else(|_| "https://raw.githubusercontent.com".to_string());
        Self::new(base_url)
    }

    /// Build a raw-content client for the given base URL.
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("build blocking http client");
        Self { base_url, client }
    }
}

impl RawHost for HttpRawHost {
    fn fetch_file(&self, owner: &str, repo: &str, branch: &str, file: &str) -> Option<String> {
        let url = format!(
            "{}/{owner}/{repo}/{branch}/{file}",
            self.base_url.trim_end_matches('/')
        );
        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(err) => {
                debug!("skip {branch}/{file}: {err}");
                return None;
            }
        };
        if !response.status().is_success() {
            debug!("skip {branch}/{file}: status {}", response.status());
            return None;
        }
        response.text().ok()
    }
}

/// Probe candidate branches and files, accumulating labeled excerpts.
///
/// Every fetch failure is non-fatal. After a branch's file list completes,
/// no further branches are probed once the blob holds enough content. An
/// empty blob means nothing could be fetched.
pub fn acquire(host: &dyn RawHost, owner: &str, repo: &str) -> ContentBlob {
    let mut blob = ContentBlob::new();

    for branch in CANDIDATE_BRANCHES {
        for file in CANDIDATE_FILES {
            if let Some(contents) = host.fetch_file(owner, repo, branch, file) {
                debug!("got {branch}/{file} ({} bytes)", contents.len());
                blob.append_file(file, &contents);
            }
        }
        if blob.has_enough() {
            break;
        }
    }

    blob
}

/// Raw host backed by a closure from (branch, file) to contents, for tests
/// that script acquisition outcomes without a network client.
#[cfg(test)]
pub(crate) struct ScriptedHost<F>(pub(crate) F);

#[cfg(test)]
impl<F> RawHost for ScriptedHost<F>
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn fetch_file(&self, _owner: &str, _repo: &str, branch: &str, file: &str) -> Option<String> {
        (self.0)(branch, file)
    }
}
