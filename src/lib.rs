//! # Gitea Release
//!
//! Publish build artifacts to a release on a Gitea-compatible server.
//!
//! A run creates the release for a tag, or updates it with the fields that were
//! requested, then replaces the release's attachments with the local files
//! matched by a set of glob patterns. Optional `.md5` / `.sha256` sidecars carry
//! the checksum of each file.
//!
//! ## Features
//!
//! - **Idempotent**: re-running with the same inputs leaves one attachment per
//!   name with the current content
//! - **Field merge**: unset inputs never clear values on an existing release
//! - **Checksums**: MD5 and SHA-256 sidecars per artifact
//! - **CI friendly**: every option also reads an `INPUT_*` environment variable
//!
//! ## Usage
//!
//! ```bash
//! gitea_release --server-url https://git.example.com --repository org/app \
//!     --token "$TOKEN" --tag-name v1.2.0 --files 'dist/*' --sha256sum true
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod api;
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod publish;
pub mod release;
pub mod sync;

// Re-export main types for public API
pub use api::{GiteaClient, Lookup, Release, ReleaseApi, ReleaseRequest, RepoRef};
pub use artifacts::Artifact;
pub use cli::Args;
pub use config::PublishConfig;
pub use digest::DigestKind;
pub use error::{ApiError, ConfigError, ReleaseError, Result};
pub use publish::{PublishOutcome, Publisher};
pub use release::ReleaseReconciler;
pub use sync::{AttachmentSynchronizer, SyncOptions, SyncReport};
