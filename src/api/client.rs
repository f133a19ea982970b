//! HTTP client for the Gitea release API.

use super::{ApiResult, Attachment, EditRelease, Release, ReleaseApi, ReleaseRequest, RepoRef};
use crate::error::{ApiError, ConfigError, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Release API client bound to one server and token
#[derive(Debug, Clone)]
pub struct GiteaClient {
    http: reqwest::Client,
    /// `{server_url}/api/v1`
    base: Url,
    token: String,
}

impl GiteaClient {
    /// Create a client for `server_url` (the web root of the instance).
    pub fn new(server_url: &str, token: impl Into<String>) -> Result<Self> {
        let invalid = |reason: String| ConfigError::InvalidServerUrl {
            value: server_url.to_string(),
            reason,
        };

        let mut base = Url::parse(server_url).map_err(|e| invalid(e.to_string()))?;
        base.path_segments_mut()
            .map_err(|()| invalid("URL cannot be used as a base".to_string()))?
            .pop_if_empty()
            .extend(["api", "v1"]);

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base,
            token: token.into(),
        })
    }

    /// API base URL
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build `{base}/repos/{owner}/{repo}/releases/{segments...}` with each
    /// segment percent-encoded.
    fn releases_url(&self, repo: &RepoRef, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(["repos", repo.owner.as_str(), repo.repo.as_str(), "releases"])
                .extend(segments);
        }
        url
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = self.authorized(builder).send().await?;
        check_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Map non-success statuses to [`ApiError`]
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let message = response.text().await.unwrap_or_default();
    log::debug!("{} -> {}: {}", url, status, message);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::NotAuthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::NOT_FOUND => ApiError::NotFound { url },
        _ => ApiError::Status {
            status: status.as_u16(),
            url,
            message,
        },
    })
}

impl ReleaseApi for GiteaClient {
    async fn get_release_by_tag(&self, repo: &RepoRef, tag: &str) -> ApiResult<Release> {
        let url = self.releases_url(repo, &["tags", tag]);
        log::debug!("GET {}", url);
        self.send_json(self.http.get(url)).await
    }

    async fn create_release(
        &self,
        repo: &RepoRef,
        request: &ReleaseRequest,
    ) -> ApiResult<Release> {
        let url = self.releases_url(repo, &[]);
        log::debug!("POST {}", url);
        self.send_json(self.http.post(url).json(request)).await
    }

    async fn update_release(
        &self,
        repo: &RepoRef,
        release_id: i64,
        edit: &EditRelease,
    ) -> ApiResult<Release> {
        let id = release_id.to_string();
        let url = self.releases_url(repo, &[id.as_str()]);
        log::debug!("PATCH {}", url);
        self.send_json(self.http.patch(url).json(edit)).await
    }

    async fn list_attachments(
        &self,
        repo: &RepoRef,
        release_id: i64,
    ) -> ApiResult<Vec<Attachment>> {
        let id = release_id.to_string();
        let url = self.releases_url(repo, &[id.as_str(), "assets"]);
        log::debug!("GET {}", url);
        self.send_json(self.http.get(url)).await
    }

    async fn delete_attachment(
        &self,
        repo: &RepoRef,
        release_id: i64,
        attachment_id: i64,
    ) -> ApiResult<()> {
        let id = release_id.to_string();
        let attachment_id = attachment_id.to_string();
        let url = self.releases_url(repo, &[id.as_str(), "assets", attachment_id.as_str()]);
        log::debug!("DELETE {}", url);
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn upload_attachment(
        &self,
        repo: &RepoRef,
        release_id: i64,
        name: &str,
        content_type: &str,
        content: Bytes,
    ) -> ApiResult<Attachment> {
        let id = release_id.to_string();
        let mut url = self.releases_url(repo, &[id.as_str(), "assets"]);
        url.query_pairs_mut().append_pair("name", name);
        log::debug!("POST {} ({} bytes)", url, content.len());

        let part = Part::bytes(content.to_vec())
            .file_name(name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("attachment", part);

        self.send_json(self.http.post(url).multipart(form)).await
    }
}
