//! Attachment synchronization.
//!
//! Replaces each artifact's attachment (and its checksum sidecars) on a
//! release, so that repeated runs converge on one attachment per name whose
//! content matches the local file.

use crate::api::{Attachment, ReleaseApi, RepoRef};
use crate::artifacts::{Artifact, without_generated_sidecars};
use crate::digest::DigestKind;
use crate::error::Result;
use bytes::Bytes;
use std::collections::HashSet;

/// Content type of checksum sidecars
const SIDECAR_CONTENT_TYPE: &str = "text/plain";

/// Which checksum sidecars to upload next to each artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Upload `{name}.md5`
    pub md5: bool,
    /// Upload `{name}.sha256`
    pub sha256: bool,
}

impl SyncOptions {
    /// Enabled digest kinds, MD5 first
    pub fn digest_kinds(&self) -> Vec<DigestKind> {
        let mut kinds = Vec::with_capacity(2);
        if self.md5 {
            kinds.push(DigestKind::Md5);
        }
        if self.sha256 {
            kinds.push(DigestKind::Sha256);
        }
        kinds
    }
}

/// Attachment changes made by one sync
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Names of attachments deleted, in call order
    pub deleted: Vec<String>,
    /// Names of attachments uploaded, in call order
    pub uploaded: Vec<String>,
}

/// Uploads artifacts to a release, replacing same-named attachments
#[derive(Debug)]
pub struct AttachmentSynchronizer<'a, A> {
    api: &'a A,
    repo: &'a RepoRef,
}

impl<'a, A: ReleaseApi> AttachmentSynchronizer<'a, A> {
    /// Create a synchronizer for one repository
    pub fn new(api: &'a A, repo: &'a RepoRef) -> Self {
        Self { api, repo }
    }

    /// Sync `artifacts` onto release `release_id`, one at a time in order.
    ///
    /// Artifacts named like a sidecar this run generates are skipped.
    /// The attachment listing is read once up front. For each artifact every
    /// listed attachment carrying one of its names is deleted before the new
    /// content is uploaded; a delete answered with not-found counts as done.
    pub async fn sync(
        &self,
        release_id: i64,
        artifacts: &[Artifact],
        options: SyncOptions,
    ) -> Result<SyncReport> {
        let snapshot = self.api.list_attachments(self.repo, release_id).await?;
        log::debug!(
            "Release {} has {} existing attachment(s)",
            release_id,
            snapshot.len()
        );

        let kinds = options.digest_kinds();
        let mut report = SyncReport::default();

        for artifact in without_generated_sidecars(artifacts, &kinds) {
            let mut names = vec![artifact.name.clone()];
            names.extend(kinds.iter().map(|kind| kind.sidecar_name(&artifact.name)));

            self.delete_named(release_id, &snapshot, &names, &mut report)
                .await?;

            let content = Bytes::from(tokio::fs::read(&artifact.path).await?);

            let uploaded = self
                .api
                .upload_attachment(
                    self.repo,
                    release_id,
                    &artifact.name,
                    artifact.content_type(),
                    content.clone(),
                )
                .await?;
            log::info!("Uploaded {} ({} bytes)", uploaded.name, content.len());
            report.uploaded.push(artifact.name.clone());

            for kind in &kinds {
                let sidecar = kind.sidecar_name(&artifact.name);
                let digest = kind.hex_digest(&content);
                self.api
                    .upload_attachment(
                        self.repo,
                        release_id,
                        &sidecar,
                        SIDECAR_CONTENT_TYPE,
                        Bytes::from(digest),
                    )
                    .await?;
                log::info!("Uploaded {}", sidecar);
                report.uploaded.push(sidecar);
            }
        }

        Ok(report)
    }

    async fn delete_named(
        &self,
        release_id: i64,
        snapshot: &[Attachment],
        names: &[String],
        report: &mut SyncReport,
    ) -> Result<()> {
        let names: HashSet<&str> = names.iter().map(String::as_str).collect();

        for attachment in snapshot.iter().filter(|a| names.contains(a.name.as_str())) {
            match self
                .api
                .delete_attachment(self.repo, release_id, attachment.id)
                .await
            {
                Ok(()) => log::info!("Deleted old attachment {}", attachment.name),
                Err(e) if e.is_not_found() => {
                    log::debug!("Attachment {} was already gone", attachment.name)
                }
                Err(e) => return Err(e.into()),
            }
            report.deleted.push(attachment.name.clone());
        }

        Ok(())
    }
}
