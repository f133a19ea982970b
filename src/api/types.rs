//! Wire types for the release API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository a release belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoRef {
    /// Create a repository reference
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Desired release state.
///
/// Unset fields are left out of the request body, so on create the server
/// applies its defaults and on update the existing value is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseRequest {
    /// Tag the release is keyed by
    pub tag_name: String,
    /// Release title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Release notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Draft flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Pre-release flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
    /// Commit or branch the tag points at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
}

impl ReleaseRequest {
    /// Request for a tag with every optional field unset
    pub fn for_tag(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }
}

/// Fully merged release fields submitted as an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRelease {
    /// Tag name
    pub tag_name: String,
    /// Release title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Draft flag
    pub draft: bool,
    /// Pre-release flag
    pub prerelease: bool,
    /// Commit or branch the tag points at
    pub target_commitish: String,
}

/// Release record as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Server-assigned release ID
    pub id: i64,
    /// Tag name
    pub tag_name: String,
    /// Release title
    #[serde(default)]
    pub name: String,
    /// Release notes
    #[serde(default)]
    pub body: String,
    /// Draft flag
    #[serde(default)]
    pub draft: bool,
    /// Pre-release flag
    #[serde(default)]
    pub prerelease: bool,
    /// Commit or branch the tag points at
    #[serde(default)]
    pub target_commitish: String,
    /// Web page of the release
    #[serde(default)]
    pub html_url: String,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Publication time (unset for drafts)
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// File attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    /// Server-assigned attachment ID
    pub id: i64,
    /// File name, unique within the release
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Download URL
    #[serde(default)]
    pub browser_download_url: String,
    /// Upload time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
