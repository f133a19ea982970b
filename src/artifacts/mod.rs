//! Artifact discovery from glob patterns.
//!
//! Expands the configured file patterns into the ordered list of regular files
//! that will be attached to the release.

use crate::digest::DigestKind;
use crate::error::{ConfigError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A local file to attach to the release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path on disk
    pub path: PathBuf,
    /// Attachment name (the path's basename)
    pub name: String,
}

impl Artifact {
    /// Build an artifact from a path, using its file name as the attachment name
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::InvalidArtifactName { path: path.clone() })?;

        Ok(Self { path, name })
    }

    /// Content type used for the primary upload
    pub fn content_type(&self) -> &'static str {
        detect_content_type(&self.path)
    }
}

/// Resolve patterns relative to the current directory.
pub fn resolve(patterns: &[String]) -> Result<Vec<Artifact>> {
    resolve_in(Path::new(""), patterns)
}

/// Resolve patterns relative to `root`.
///
/// Patterns are expanded in order and matches keep glob order within a pattern.
/// Only regular files are kept (symlinks are followed, so a link to a directory
/// is dropped). A path matched by several patterns appears once. When two
/// different paths share a basename only the first is kept, because both would
/// be uploaded under the same attachment name.
pub fn resolve_in(root: &Path, patterns: &[String]) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    let mut seen_paths = HashSet::new();
    let mut seen_names = HashSet::new();

    let root = PathBuf::from(glob::Pattern::escape(&root.to_string_lossy()));

    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let pattern_path = root.join(pattern);
        let pattern_str = pattern_path.to_string_lossy();

        let entries = glob::glob(&pattern_str).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut matched = 0usize;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("Skipping unreadable match for '{}': {}", pattern, e);
                    continue;
                }
            };

            if !path.is_file() || !seen_paths.insert(path.clone()) {
                continue;
            }

            let artifact = match Artifact::from_path(path) {
                Ok(artifact) => artifact,
                Err(e) => {
                    log::warn!("Skipping match for '{}': {}", pattern, e);
                    continue;
                }
            };
            if !seen_names.insert(artifact.name.clone()) {
                log::warn!(
                    "Skipping {}: another artifact is already named '{}'",
                    artifact.path.display(),
                    artifact.name
                );
                continue;
            }

            matched += 1;
            artifacts.push(artifact);
        }

        log::debug!("Pattern '{}' matched {} file(s)", pattern, matched);
    }

    Ok(artifacts)
}

/// Drop artifacts named like a checksum file generated for another artifact.
///
/// With sha256 sums enabled, a pre-built `app.bin.sha256` next to `app.bin`
/// would be written twice under one attachment name; the generated one wins.
pub fn without_generated_sidecars<'a>(
    artifacts: &'a [Artifact],
    kinds: &[DigestKind],
) -> Vec<&'a Artifact> {
    let generated: HashSet<String> = artifacts
        .iter()
        .flat_map(|a| kinds.iter().map(move |kind| kind.sidecar_name(&a.name)))
        .collect();

    artifacts
        .iter()
        .filter(|artifact| {
            let clashes = generated.contains(&artifact.name);
            if clashes {
                log::warn!(
                    "Skipping {}: '{}' is generated as a checksum attachment",
                    artifact.path.display(),
                    artifact.name
                );
            }
            !clashes
        })
        .collect()
}

/// Detect MIME type for an artifact from its extension
pub fn detect_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("deb") => "application/vnd.debian.binary-package",
        Some("rpm") => "application/x-rpm",
        Some("exe") | Some("msi") => "application/x-msdownload",
        Some("dmg") => "application/x-apple-diskimage",
        Some("zip") => "application/zip",
        Some("gz") | Some("tgz") => "application/gzip",
        Some("tar") => "application/x-tar",
        Some("json") => "application/json",
        Some("txt") | Some("md5") | Some("sha256") => "text/plain",
        _ => "application/octet-stream",
    }
}
