//! Validated run configuration.
//!
//! Turns raw [`Args`](crate::cli::Args) into the values the publisher works
//! with: repository reference, release request, file patterns, sync options.

use crate::api::{ReleaseRequest, RepoRef};
use crate::cli::Args;
use crate::error::{ConfigError, Result};
use crate::sync::SyncOptions;

/// Everything one publish run needs
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Base URL of the hosting service
    pub server_url: String,
    /// Target repository
    pub repo: RepoRef,
    /// API token
    pub token: String,
    /// Desired release state
    pub release: ReleaseRequest,
    /// Glob patterns of files to attach, in order
    pub patterns: Vec<String>,
    /// Checksum sidecars to upload
    pub sync: SyncOptions,
}

impl PublishConfig {
    /// Validate and normalize command line arguments.
    ///
    /// Empty strings count as unset. When `body_path` is given its content
    /// replaces `body`, and failing to read it is an error.
    pub fn from_args(args: &Args) -> Result<Self> {
        let repo = parse_repository(&args.repository)?;

        let body = match args.body_path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Some(std::fs::read_to_string(path).map_err(|source| {
                ConfigError::BodyPathUnreadable {
                    path: path.clone(),
                    source,
                }
            })?),
            None => non_empty(args.body.as_deref()),
        };

        let release = ReleaseRequest {
            tag_name: args.tag_name.clone(),
            name: non_empty(args.name.as_deref()),
            body,
            draft: flag(args.draft.as_deref()),
            prerelease: flag(args.prerelease.as_deref()),
            target_commitish: non_empty(args.target_commitish.as_deref()),
        };

        Ok(Self {
            server_url: args.server_url.clone(),
            repo,
            token: args.token.clone(),
            release,
            patterns: split_patterns(args.files.as_deref().unwrap_or_default()),
            sync: SyncOptions {
                md5: is_truthy(args.md5sum.as_deref()),
                sha256: is_truthy(args.sha256sum.as_deref()),
            },
        })
    }
}

/// Split `owner/repo` into a [`RepoRef`]
pub fn parse_repository(value: &str) -> Result<RepoRef> {
    let invalid = || ConfigError::InvalidRepository {
        value: value.to_string(),
    };

    let (owner, repo) = value.trim().split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(invalid().into());
    }

    Ok(RepoRef::new(owner, repo))
}

/// Any non-empty value is true, including "false"
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// `Some(true)` for a truthy value, `None` otherwise so the flag never
/// clears an existing release's setting
fn flag(value: Option<&str>) -> Option<bool> {
    is_truthy(value).then_some(true)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// One pattern per non-blank line
pub fn split_patterns(files: &str) -> Vec<String> {
    files
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
