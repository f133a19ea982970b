//! In-memory release API used by the integration tests.

#![allow(dead_code)]

use bytes::Bytes;
use gitea_release::api::{ApiResult, Attachment, EditRelease};
use gitea_release::{ApiError, Release, ReleaseApi, ReleaseRequest, RepoRef};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetByTag(String),
    Create(String),
    Update(i64),
    List(i64),
    Delete(String),
    Upload(String),
}

/// Attachment content held by the fake server
#[derive(Debug, Clone)]
pub struct Stored {
    pub attachment: Attachment,
    pub content: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct State {
    releases: Vec<Release>,
    attachments: BTreeMap<i64, Vec<Stored>>,
    next_id: i64,
    calls: Vec<Call>,
    lookup_status: Option<u16>,
    ghosts: BTreeMap<i64, Vec<Attachment>>,
}

/// Release API double. Names are unique per release: uploading a name that
/// already exists fails with 409, like the real server.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

pub fn repo() -> RepoRef {
    RepoRef::new("org", "app")
}

pub fn release(id: i64, tag: &str) -> Release {
    Release {
        id,
        tag_name: tag.to_string(),
        name: String::new(),
        body: String::new(),
        draft: false,
        prerelease: false,
        target_commitish: "main".to_string(),
        html_url: format!("https://git.example.com/org/app/releases/tag/{tag}"),
        created_at: None,
        published_at: None,
    }
}

fn status(code: u16) -> ApiError {
    match code {
        401 | 403 => ApiError::NotAuthorized {
            status: code,
            message: "token rejected".to_string(),
        },
        404 => ApiError::NotFound {
            url: "fake".to_string(),
        },
        _ => ApiError::Status {
            status: code,
            url: "fake".to_string(),
            message: format!("status {code}"),
        },
    }
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.state.lock().unwrap().next_id = 100;
        api
    }

    pub fn with_release(self, release: Release) -> Self {
        self.state.lock().unwrap().releases.push(release);
        self
    }

    /// Seed an attachment on a release
    pub fn with_attachment(self, release_id: i64, name: &str, content: &[u8]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let id = state.next_id;
            state.attachments.entry(release_id).or_default().push(Stored {
                attachment: Attachment {
                    id,
                    name: name.to_string(),
                    size: content.len() as u64,
                    browser_download_url: String::new(),
                    created_at: None,
                },
                content: content.to_vec(),
                content_type: "application/octet-stream".to_string(),
            });
        }
        self
    }

    /// Make every tag lookup fail with `code`
    pub fn fail_lookup(self, code: u16) -> Self {
        self.state.lock().unwrap().lookup_status = Some(code);
        self
    }

    /// List an attachment that is already gone by the time it is deleted,
    /// as when a concurrent run removed it after the listing was taken
    pub fn with_ghost(self, release_id: i64, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let id = state.next_id;
            state.ghosts.entry(release_id).or_default().push(Attachment {
                id,
                name: name.to_string(),
                size: 0,
                browser_download_url: String::new(),
                created_at: None,
            });
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn releases(&self) -> Vec<Release> {
        self.state.lock().unwrap().releases.clone()
    }

    /// `(name, content)` pairs on a release, sorted by name
    pub fn attachments(&self, release_id: i64) -> Vec<(String, Vec<u8>)> {
        let state = self.state.lock().unwrap();
        let mut pairs: Vec<_> = state
            .attachments
            .get(&release_id)
            .map(|list| {
                list.iter()
                    .map(|s| (s.attachment.name.clone(), s.content.clone()))
                    .collect()
            })
            .unwrap_or_default();
        pairs.sort();
        pairs
    }

    pub fn stored(&self, release_id: i64, name: &str) -> Option<Stored> {
        let state = self.state.lock().unwrap();
        state
            .attachments
            .get(&release_id)?
            .iter()
            .find(|s| s.attachment.name == name)
            .cloned()
    }
}

impl ReleaseApi for FakeApi {
    async fn get_release_by_tag(&self, _repo: &RepoRef, tag: &str) -> ApiResult<Release> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::GetByTag(tag.to_string()));
        if let Some(code) = state.lookup_status {
            return Err(status(code));
        }
        state
            .releases
            .iter()
            .find(|r| r.tag_name == tag)
            .cloned()
            .ok_or_else(|| status(404))
    }

    async fn create_release(
        &self,
        _repo: &RepoRef,
        request: &ReleaseRequest,
    ) -> ApiResult<Release> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(request.tag_name.clone()));
        if state.releases.iter().any(|r| r.tag_name == request.tag_name) {
            return Err(status(409));
        }

        state.next_id += 1;
        let mut created = release(state.next_id, &request.tag_name);
        created.name = request.name.clone().unwrap_or_default();
        created.body = request.body.clone().unwrap_or_default();
        created.draft = request.draft.unwrap_or(false);
        created.prerelease = request.prerelease.unwrap_or(false);
        if let Some(target) = &request.target_commitish {
            created.target_commitish = target.clone();
        }
        state.releases.push(created.clone());
        Ok(created)
    }

    async fn update_release(
        &self,
        _repo: &RepoRef,
        release_id: i64,
        edit: &EditRelease,
    ) -> ApiResult<Release> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update(release_id));
        let release = state
            .releases
            .iter_mut()
            .find(|r| r.id == release_id)
            .ok_or_else(|| status(404))?;

        release.tag_name = edit.tag_name.clone();
        release.name = edit.name.clone();
        release.body = edit.body.clone();
        release.draft = edit.draft;
        release.prerelease = edit.prerelease;
        release.target_commitish = edit.target_commitish.clone();
        Ok(release.clone())
    }

    async fn list_attachments(
        &self,
        _repo: &RepoRef,
        release_id: i64,
    ) -> ApiResult<Vec<Attachment>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List(release_id));
        let mut listing: Vec<Attachment> = state
            .attachments
            .get(&release_id)
            .map(|list| list.iter().map(|s| s.attachment.clone()).collect())
            .unwrap_or_default();
        if let Some(ghosts) = state.ghosts.get(&release_id) {
            listing.extend(ghosts.iter().cloned());
        }
        Ok(listing)
    }

    async fn delete_attachment(
        &self,
        _repo: &RepoRef,
        release_id: i64,
        attachment_id: i64,
    ) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        let list = state.attachments.entry(release_id).or_default();
        let position = list.iter().position(|s| s.attachment.id == attachment_id);
        match position {
            Some(index) => {
                let removed = list.remove(index);
                state.calls.push(Call::Delete(removed.attachment.name));
                Ok(())
            }
            None => {
                state.calls.push(Call::Delete(format!("#{attachment_id}")));
                Err(status(404))
            }
        }
    }

    async fn upload_attachment(
        &self,
        _repo: &RepoRef,
        release_id: i64,
        name: &str,
        content_type: &str,
        content: Bytes,
    ) -> ApiResult<Attachment> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Upload(name.to_string()));
        state.next_id += 1;
        let id = state.next_id;

        let list = state.attachments.entry(release_id).or_default();
        if list.iter().any(|s| s.attachment.name == name) {
            return Err(status(409));
        }

        let attachment = Attachment {
            id,
            name: name.to_string(),
            size: content.len() as u64,
            browser_download_url: format!("https://git.example.com/attachments/{id}"),
            created_at: None,
        };
        list.push(Stored {
            attachment: attachment.clone(),
            content: content.to_vec(),
            content_type: content_type.to_string(),
        });
        Ok(attachment)
    }
}
