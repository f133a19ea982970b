//! Release reconciliation: find the release for a tag and bring it to the
//! requested state, or create it.

use crate::api::{EditRelease, Lookup, Release, ReleaseApi, ReleaseRequest, RepoRef};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Whether a requested value counts as set
pub trait Presence {
    /// `true` when the value should override an existing one
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        true
    }
}

/// Requested value if present, otherwise the existing one
pub fn coalesce<T: Presence>(desired: Option<T>, existing: T) -> T {
    desired.filter(Presence::is_present).unwrap_or(existing)
}

/// Merge a request over an existing release, field by field
pub fn merge(desired: &ReleaseRequest, existing: &Release) -> EditRelease {
    EditRelease {
        tag_name: coalesce(Some(desired.tag_name.clone()), existing.tag_name.clone()),
        name: coalesce(desired.name.clone(), existing.name.clone()),
        body: coalesce(desired.body.clone(), existing.body.clone()),
        draft: coalesce(desired.draft, existing.draft),
        prerelease: coalesce(desired.prerelease, existing.prerelease),
        target_commitish: coalesce(
            desired.target_commitish.clone(),
            existing.target_commitish.clone(),
        ),
    }
}

/// Creates or updates the release for a tag
#[derive(Debug)]
pub struct ReleaseReconciler<'a, A> {
    api: &'a A,
    repo: &'a RepoRef,
}

impl<'a, A: ReleaseApi> ReleaseReconciler<'a, A> {
    /// Create a reconciler for one repository
    pub fn new(api: &'a A, repo: &'a RepoRef) -> Self {
        Self { api, repo }
    }

    /// Return the release for `desired.tag_name`, updated with the fields set
    /// in `desired`, creating it if the server has none for the tag.
    ///
    /// Only a not-found answer to the lookup leads to a create; any other
    /// lookup failure is returned as is.
    pub async fn reconcile(&self, desired: &ReleaseRequest) -> Result<Release> {
        let lookup = Lookup::from(
            self.api
                .get_release_by_tag(self.repo, &desired.tag_name)
                .await,
        );

        match lookup {
            Lookup::Found(existing) => self.update(desired, &existing).await,
            Lookup::NotFound => {
                log::info!(
                    "No release for tag {} in {}, creating one",
                    desired.tag_name,
                    self.repo
                );
                let created = self.api.create_release(self.repo, desired).await?;
                log::info!("Created release {} ({})", created.id, created.html_url);
                Ok(created)
            }
            Lookup::Failed(e) => Err(e.into()),
        }
    }

    async fn update(&self, desired: &ReleaseRequest, existing: &Release) -> Result<Release> {
        let edit = merge(desired, existing);

        if edit.target_commitish != existing.target_commitish {
            log::info!(
                "Release {} target_commitish changed: {} -> {}",
                existing.tag_name,
                existing.target_commitish,
                edit.target_commitish
            );
        }
        let stamp = |at: Option<DateTime<Utc>>| match at {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "never".to_string(),
        };
        log::info!(
            "Updating release {} (id {}, created {}, published {})",
            existing.tag_name,
            existing.id,
            stamp(existing.created_at),
            stamp(existing.published_at)
        );

        let updated = self
            .api
            .update_release(self.repo, existing.id, &edit)
            .await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Release {
        Release {
            id: 1,
            tag_name: "v1.0.0".to_string(),
            name: "Old name".to_string(),
            body: "Old notes".to_string(),
            draft: true,
            prerelease: false,
            target_commitish: "main".to_string(),
            html_url: "https://git.example.com/o/r/releases/tag/v1.0.0".to_string(),
            created_at: None,
            published_at: None,
        }
    }

    #[test]
    fn test_coalesce_strings() {
        assert_eq!(coalesce(Some("new".to_string()), "old".to_string()), "new");
        assert_eq!(coalesce(Some(String::new()), "old".to_string()), "old");
        assert_eq!(coalesce(None, "old".to_string()), "old");
    }

    #[test]
    fn test_coalesce_bools() {
        assert!(coalesce(None, true));
        assert!(!coalesce(Some(false), true));
        assert!(coalesce(Some(true), false));
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut desired = ReleaseRequest::for_tag("v1.0.0");
        desired.name = Some("Release 1.0".to_string());

        let edit = merge(&desired, &existing());
        assert_eq!(edit.name, "Release 1.0");
        assert_eq!(edit.body, "Old notes");
        assert!(edit.draft);
        assert!(!edit.prerelease);
        assert_eq!(edit.target_commitish, "main");
    }

    #[test]
    fn test_merge_overrides_present_fields() {
        let desired = ReleaseRequest {
            tag_name: "v1.0.0".to_string(),
            name: None,
            body: Some("New notes".to_string()),
            draft: None,
            prerelease: Some(true),
            target_commitish: Some("release/1.0".to_string()),
        };

        let edit = merge(&desired, &existing());
        assert_eq!(edit.name, "Old name");
        assert_eq!(edit.body, "New notes");
        assert!(edit.prerelease);
        assert_eq!(edit.target_commitish, "release/1.0");
    }
}
