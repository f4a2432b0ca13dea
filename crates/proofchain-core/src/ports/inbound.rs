//! # Inbound Ports (Driving Ports / API)
//!
//! Operations this crate offers to its host (HTTP gateway, CLI, tests).

use crate::domain::entities::{CertificateRecord, CertificateRequest, IssuedCertificate};
use crate::domain::errors::{IssuanceFailure, VerifyError};

/// Certificate issuance entry point.
#[async_trait::async_trait]
pub trait IssuanceApi: Send + Sync {
    /// Issue a certificate: derive the fingerprint, mint the on-chain asset,
    /// persist the record.
    ///
    /// Stages execute strictly in sequence; no retries are performed at any
    /// stage. The failure identifies the stage it occurred in, and carries
    /// the transaction id when the ledger effect already happened.
    async fn issue(&self, request: CertificateRequest)
        -> Result<IssuedCertificate, IssuanceFailure>;
}

/// Read-only certificate lookup by fingerprint.
#[async_trait::async_trait]
pub trait VerificationApi: Send + Sync {
    /// Look up the persisted record for `hash`.
    ///
    /// No on-chain lookup is performed; the persisted record is the source
    /// of truth. Idempotent and side-effect free.
    async fn verify(&self, hash: &str) -> Result<CertificateRecord, VerifyError>;
}
