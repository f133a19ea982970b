//! Command line argument parsing.
//!
//! Every option can also be supplied through an `INPUT_*` environment
//! variable, which is how CI actions pass their inputs.

use clap::Parser;
use std::path::PathBuf;

/// Publish build artifacts to a Gitea release
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "gitea_release",
    version,
    about = "Create or update a Gitea release and upload its artifacts",
    long_about = "Create or update the release for a tag, then replace its attachments with the
files matched by the given glob patterns. Re-running with the same inputs converges
on the same release and attachment set.

Usage:
  gitea_release --server-url https://git.example.com --repository org/app \\
      --token $TOKEN --tag-name v1.2.0 --files 'dist/*.tar.gz' --sha256sum true"
)]
pub struct Args {
    /// Base URL of the Gitea instance
    #[arg(long, env = "INPUT_SERVER_URL")]
    pub server_url: String,

    /// Repository as owner/repo
    #[arg(long, env = "INPUT_REPOSITORY")]
    pub repository: String,

    /// API token
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Tag the release is attached to
    #[arg(long, env = "INPUT_TAG_NAME")]
    pub tag_name: String,

    /// Release title
    #[arg(long, env = "INPUT_NAME")]
    pub name: Option<String>,

    /// Release notes
    #[arg(long, env = "INPUT_BODY")]
    pub body: Option<String>,

    /// File whose content replaces --body
    #[arg(long, env = "INPUT_BODY_PATH")]
    pub body_path: Option<PathBuf>,

    /// Mark as draft (any non-empty value)
    #[arg(long, env = "INPUT_DRAFT")]
    pub draft: Option<String>,

    /// Mark as pre-release (any non-empty value)
    #[arg(long, env = "INPUT_PRERELEASE")]
    pub prerelease: Option<String>,

    /// Commit or branch the tag is created from
    #[arg(long, env = "INPUT_TARGET_COMMITISH")]
    pub target_commitish: Option<String>,

    /// Newline-separated glob patterns of files to attach
    #[arg(long, env = "INPUT_FILES")]
    pub files: Option<String>,

    /// Upload an .md5 sidecar per file (any non-empty value)
    #[arg(long, env = "INPUT_MD5SUM")]
    pub md5sum: Option<String>,

    /// Upload a .sha256 sidecar per file (any non-empty value)
    #[arg(long, env = "INPUT_SHA256SUM")]
    pub sha256sum: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "gitea_release",
            "--server-url",
            "https://git.example.com",
            "--repository",
            "org/app",
            "--token",
            "secret",
            "--tag-name",
            "v1.0.0",
            "--files",
            "dist/*.zip\ndist/*.tar.gz",
            "--md5sum",
            "true",
        ])
        .unwrap();

        assert_eq!(args.repository, "org/app");
        assert_eq!(args.tag_name, "v1.0.0");
        assert_eq!(args.files.as_deref(), Some("dist/*.zip\ndist/*.tar.gz"));
        assert_eq!(args.md5sum.as_deref(), Some("true"));
    }

    #[test]
    fn test_help_is_generated() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
