//! # Certificate Fingerprint
//!
//! Deterministic content hash identifying one certificate at issuance time.
//!
//! The preimage is `"{student_name}-{course}-{issued_at_millis}"` (UTF-8,
//! `-` separator, decimal millisecond timestamp), hashed with SHA-256 and
//! rendered as 64 lowercase hex characters. Independent implementations
//! reproduce identical fingerprints for identical inputs.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Rejection for empty or missing request fields.
///
/// Raised before any hashing happens; a degenerate hash is never produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Student name and course required")]
pub struct InvalidRequest;

/// 64-character lowercase hex SHA-256 digest of a certificate's content.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive a fingerprint from the request fields and the issuance instant.
    ///
    /// Pure and deterministic given identical inputs. The timestamp is part
    /// of the preimage, so re-submission of the same logical request only
    /// collides within the same millisecond; duplicate submissions are
    /// otherwise allowed and produce distinct certificates (the store
    /// rejects exact fingerprint collisions).
    pub fn derive(
        student_name: &str,
        course: &str,
        issued_at_millis: i64,
    ) -> Result<Self, InvalidRequest> {
        if student_name.trim().is_empty() || course.trim().is_empty() {
            return Err(InvalidRequest);
        }

        let preimage = format!("{student_name}-{course}-{issued_at_millis}");
        let digest = Sha256::digest(preimage.as_bytes());
        Ok(Self(hex::encode(digest)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
