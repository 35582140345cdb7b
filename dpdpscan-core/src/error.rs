//! Error types for dpdpscan core.

use std::{error::Error, fmt};

/// Error type for dpdpscan core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The repository URL could not be parsed into an owner/repo pair.
    InvalidUrl(String),
    /// No content could be fetched for the repository.
    AcquisitionFailed,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(reason) => write!(f, "invalid repository URL: {reason}"),
            Self::AcquisitionFailed => write!(f, "could not fetch repository content"),
        }
    }
}

impl Error for ScanError {}

/// Convenience result type for dpdpscan core.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::ScanError;

    #[test]
    fn invalid_url_formats_reason() {
        let error = ScanError::InvalidUrl("missing owner or repo".to_string());
        assert_eq!(
            format!("{error}"),
            "invalid repository URL: missing owner or repo"
        );
    }

    #[test]
    fn acquisition_failed_formats_message() {
        let error = ScanError::AcquisitionFailed;
        assert_eq!(format!("{error}"), "could not fetch repository content");
    }
}
