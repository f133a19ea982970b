//! Publish flow: reconcile the release, resolve artifacts, sync attachments.

use crate::api::{Release, ReleaseApi};
use crate::artifacts;
use crate::config::PublishConfig;
use crate::error::Result;
use crate::release::ReleaseReconciler;
use crate::sync::{AttachmentSynchronizer, SyncReport};
use std::path::{Path, PathBuf};

/// Result of a successful publish run
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Release as returned by the last create/update
    pub release: Release,
    /// Number of artifacts resolved from the patterns
    pub artifacts: usize,
    /// Attachment changes
    pub report: SyncReport,
}

/// Runs one publish against a release API
#[derive(Debug)]
pub struct Publisher<'a, A> {
    api: &'a A,
    /// Directory relative patterns are resolved against, if not the current one
    root: Option<PathBuf>,
}

impl<'a, A: ReleaseApi> Publisher<'a, A> {
    /// Publisher resolving patterns against the current directory
    pub fn new(api: &'a A) -> Self {
        Self { api, root: None }
    }

    /// Resolve relative patterns against `root` instead
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    /// Reconcile the release, then sync the matched files onto it.
    ///
    /// Stops at the first failure. Attachments already replaced stay replaced;
    /// running again converges.
    pub async fn run(&self, config: &PublishConfig) -> Result<PublishOutcome> {
        let release = ReleaseReconciler::new(self.api, &config.repo)
            .reconcile(&config.release)
            .await?;

        let artifacts = match &self.root {
            Some(root) => artifacts::resolve_in(root, &config.patterns)?,
            None => artifacts::resolve(&config.patterns)?,
        };
        if artifacts.is_empty() {
            log::warn!(
                "No files matched {:?}; the release will have no new attachments",
                config.patterns
            );
        }

        let report = AttachmentSynchronizer::new(self.api, &config.repo)
            .sync(release.id, &artifacts, config.sync)
            .await?;

        Ok(PublishOutcome {
            release,
            artifacts: artifacts.len(),
            report,
        })
    }
}
