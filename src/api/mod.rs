//! Release hosting API: the operations the publisher needs, and an HTTP client
//! implementing them against a Gitea-compatible server.

mod client;
mod types;

pub use client::GiteaClient;
pub use types::{Attachment, EditRelease, Release, ReleaseRequest, RepoRef};

use crate::error::ApiError;
use bytes::Bytes;

/// Result type for single API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Remote operations on releases and their attachments.
///
/// Every call is addressed by repository. Implementations report a missing
/// resource as [`ApiError::NotFound`] so callers can tell it apart from other
/// failures.
#[allow(async_fn_in_trait)]
pub trait ReleaseApi {
    /// `GET /repos/{owner}/{repo}/releases/tags/{tag}`
    async fn get_release_by_tag(&self, repo: &RepoRef, tag: &str) -> ApiResult<Release>;

    /// `POST /repos/{owner}/{repo}/releases`
    async fn create_release(&self, repo: &RepoRef, request: &ReleaseRequest)
    -> ApiResult<Release>;

    /// `PATCH /repos/{owner}/{repo}/releases/{id}`
    async fn update_release(
        &self,
        repo: &RepoRef,
        release_id: i64,
        edit: &EditRelease,
    ) -> ApiResult<Release>;

    /// `GET /repos/{owner}/{repo}/releases/{id}/assets`
    async fn list_attachments(&self, repo: &RepoRef, release_id: i64)
    -> ApiResult<Vec<Attachment>>;

    /// `DELETE /repos/{owner}/{repo}/releases/{id}/assets/{attachment_id}`
    async fn delete_attachment(
        &self,
        repo: &RepoRef,
        release_id: i64,
        attachment_id: i64,
    ) -> ApiResult<()>;

    /// `POST /repos/{owner}/{repo}/releases/{id}/assets?name={name}`
    async fn upload_attachment(
        &self,
        repo: &RepoRef,
        release_id: i64,
        name: &str,
        content_type: &str,
        content: Bytes,
    ) -> ApiResult<Attachment>;
}

/// Outcome of looking a release up by tag
#[derive(Debug)]
pub enum Lookup {
    /// The release exists
    Found(Release),
    /// The server reported the tag has no release
    NotFound,
    /// Any other failure; never treated as absence
    Failed(ApiError),
}

impl From<ApiResult<Release>> for Lookup {
    fn from(result: ApiResult<Release>) -> Self {
        match result {
            Ok(release) => Lookup::Found(release),
            Err(e) if e.is_not_found() => Lookup::NotFound,
            Err(e) => Lookup::Failed(e),
        }
    }
}
