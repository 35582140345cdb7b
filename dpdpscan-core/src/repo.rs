//! Repository URL resolution.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Default hosting domain marker recognised in repository URLs.
pub const DEFAULT_HOST: &str = "github.com";

/// An owner/repository pair resolved from a hosting URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Repository owner (user or organisation).
    pub owner: String,
    /// Repository name, without any `.git` suffix.
    pub repo: String,
}

impl RepoRef {
    /// Resolve a repository URL into an owner/repo pair.
    ///
    /// `host_marker` is the hosting domain expected in the URL (e.g.
    /// [`DEFAULT_HOST`]). The URL is trimmed and a trailing slash is
    /// stripped; the path after the marker must contain at least an owner
    /// and a repository segment. A trailing `.git` on the repository
    /// segment is removed. No case normalisation is applied and the
    /// repository is not checked for existence.
    pub fn parse(url: &str, host_marker: &str) -> Result<Self> {
        let url = url.trim().trim_end_matches('/');
        let marker = format!("{host_marker}/");

        let Some(index) = url.rfind(&marker) else {
            if url.contains(host_marker) {
                return Err(ScanError::InvalidUrl(format!(
                    "no path after {host_marker}"
                )));
            }
            return Err(ScanError::InvalidUrl(format!(
                "expected a {host_marker} URL"
            )));
        };

        let path = &url[index + marker.len()..];
        let mut segments = path.split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments
            .next()
            .unwrap_or_default()
            .trim_end_matches(".git");

        if owner.is_empty() || repo.is_empty() {
            return Err(ScanError::InvalidUrl(
                "missing owner or repository segment".to_string(),
            ));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}
