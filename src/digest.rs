//! Checksum sidecar digests.
//!
//! Produces lowercase hexadecimal MD5 and SHA-256 text for artifact content.

use sha2::Digest as _;

/// Digest algorithm for checksum sidecars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    /// MD5, uploaded as `{name}.md5`
    Md5,
    /// SHA-256, uploaded as `{name}.sha256`
    Sha256,
}

impl DigestKind {
    /// File name suffix of the sidecar, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            DigestKind::Md5 => "md5",
            DigestKind::Sha256 => "sha256",
        }
    }

    /// Name of the sidecar attachment for an artifact
    pub fn sidecar_name(self, artifact_name: &str) -> String {
        format!("{}.{}", artifact_name, self.extension())
    }

    /// Hex digest of `data`
    pub fn hex_digest(self, data: &[u8]) -> String {
        match self {
            DigestKind::Md5 => md5_hex(data),
            DigestKind::Sha256 => sha256_hex(data),
        }
    }
}

/// Lowercase hex MD5 of `data`
pub fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// Lowercase hex SHA-256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(data))
}
