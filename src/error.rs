//! Error types for gitea_release operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gitea_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all gitea_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Release API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors, raised before any remote call is made
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Repository identifier is not `owner/repo`
    #[error("Invalid repository '{value}'. Expected: owner/repo")]
    InvalidRepository {
        /// Value that was supplied
        value: String,
    },

    /// Server URL could not be parsed
    #[error("Invalid server URL '{value}': {reason}")]
    InvalidServerUrl {
        /// Value that was supplied
        value: String,
        /// Reason for the error
        reason: String,
    },

    /// Release notes file could not be read
    #[error("Cannot read body_path {path}: {source}")]
    BodyPathUnreadable {
        /// Path to the notes file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Glob pattern is malformed
    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern that failed to compile
        pattern: String,
        /// Glob error
        #[source]
        source: glob::PatternError,
    },

    /// Artifact path has no usable file name
    #[error("Invalid artifact filename: {path}")]
    InvalidArtifactName {
        /// Offending path
        path: PathBuf,
    },
}

/// Errors from the remote release API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Credential rejected (401/403)
    #[error("Not authorized ({status}): {message}")]
    NotAuthorized {
        /// HTTP status code
        status: u16,
        /// Response body from the server
        message: String,
    },

    /// Resource does not exist (404)
    #[error("Not found: {url}")]
    NotFound {
        /// Requested URL
        url: String,
    },

    /// Any other non-success status
    #[error("Request to {url} failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
        /// Response body from the server
        message: String,
    },

    /// Network, TLS or decoding failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether this error is the server reporting a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Config(ConfigError::InvalidRepository { .. }) => vec![
                "Pass the repository as owner/repo, e.g. --repository my-org/my-app".to_string(),
            ],
            ReleaseError::Config(ConfigError::BodyPathUnreadable { path, .. }) => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Unset body_path to use the inline body instead".to_string(),
            ],
            ReleaseError::Config(ConfigError::InvalidPattern { .. }) => vec![
                "Check the glob syntax of each line in files".to_string(),
            ],
            ReleaseError::Api(ApiError::NotAuthorized { .. }) => vec![
                "Verify the token is valid and has write access to the repository".to_string(),
                "Check that server_url points at the right instance".to_string(),
            ],
            ReleaseError::Api(ApiError::Status { status: 409, .. }) => vec![
                "A release for this tag may have been created concurrently; re-run to update it"
                    .to_string(),
            ],
            ReleaseError::Api(ApiError::Transport(_)) => vec![
                "Check network connectivity to the server".to_string(),
                "Re-run the release; completed uploads are replaced, not duplicated".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
