//! # Verification Service
//!
//! Read-only lookup by fingerprint against the certificate store. No
//! on-chain lookup is performed; the persisted record is the source of
//! truth for verification.

use tracing::debug;

use crate::domain::entities::CertificateRecord;
use crate::domain::errors::VerifyError;
use crate::ports::inbound::VerificationApi;
use crate::ports::outbound::{CertificateStore, StoreError};

/// Verification service over a certificate store.
pub struct VerificationService<S> {
    store: S,
}

impl<S: CertificateStore> VerificationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: CertificateStore> VerificationApi for VerificationService<S> {
    async fn verify(&self, hash: &str) -> Result<CertificateRecord, VerifyError> {
        let found = self.store.find_by_hash(hash).await.map_err(|e| match e {
            StoreError::Unavailable(msg) => VerifyError::StoreUnavailable(msg),
            // find_by_hash never reports a duplicate.
            StoreError::DuplicateHash { hash } => VerifyError::StoreUnavailable(format!(
                "unexpected duplicate report for {hash}"
            )),
        })?;

        match found {
            Some(record) => {
                debug!(hash, record_id = %record.id, "certificate verified");
                Ok(record)
            }
            None => Err(VerifyError::NotFound),
        }
    }
}
