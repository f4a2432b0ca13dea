//! # Error Taxonomy
//!
//! Every external-call failure is converted to one of these kinds at the
//! boundary where it occurs; raw transport errors never cross component
//! boundaries.

use thiserror::Error;

use super::entities::{NewCertificateRecord, TransactionId};

/// Pipeline stage in which an issuance failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Request validation / fingerprint derivation.
    Validation,
    /// Fetching current network parameters from the ledger.
    Params,
    /// Building and signing the asset-creation transaction.
    Sign,
    /// Broadcasting the signed transaction.
    Broadcast,
    /// Persisting the certificate record.
    Persist,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Validation => "validation",
            Stage::Params => "params",
            Stage::Sign => "sign",
            Stage::Broadcast => "broadcast",
            Stage::Persist => "persist",
        };
        f.write_str(name)
    }
}

/// Classified issuance failure reasons.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssuanceError {
    /// Caller error; not retried. Maps to a 4xx response.
    #[error("Student name and course required")]
    InvalidRequest,

    /// Transient infrastructure fault; the whole issuance is safe to retry.
    #[error("Unable to connect to the ledger: {0}")]
    LedgerUnavailable(String),

    /// Malformed key material. Fatal misconfiguration, never auto-retried.
    #[error("Transaction signing failed: {0}")]
    SigningError(String),

    /// The network accepted the call but returned no usable transaction id.
    /// On-chain state is ambiguous; a blind retry could double-mint.
    #[error("Transaction broadcast rejected: {0}")]
    BroadcastRejected(String),

    /// A record with this fingerprint already exists. Retrying with
    /// identical input will not succeed.
    #[error("Certificate hash already exists: {hash}")]
    DuplicateHash { hash: String },

    /// The backing store is unreachable. Only the persistence step should be
    /// retried; the ledger work is already committed.
    #[error("Certificate store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Terminal failure state of one issuance: `Failed(stage, reason)`.
///
/// When the failure occurs after broadcast, `tx_id` holds the confirmed
/// transaction identifier and `pending` the record that could not be
/// persisted. The on-chain effect cannot be undone, so both are surfaced for
/// manual reconciliation instead of being masked as a generic error.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("issuance failed at {stage}: {error}")]
pub struct IssuanceFailure {
    pub stage: Stage,
    pub error: IssuanceError,
    /// Confirmed transaction id, present only for post-broadcast failures.
    pub tx_id: Option<TransactionId>,
    /// The unpersisted record, for retry-persist keyed by `tx_id`.
    pub pending: Option<NewCertificateRecord>,
}

impl IssuanceFailure {
    pub(crate) fn new(stage: Stage, error: IssuanceError) -> Self {
        Self {
            stage,
            error,
            tx_id: None,
            pending: None,
        }
    }

    pub(crate) fn after_broadcast(
        stage: Stage,
        error: IssuanceError,
        tx_id: TransactionId,
        pending: NewCertificateRecord,
    ) -> Self {
        Self {
            stage,
            error,
            tx_id: Some(tx_id),
            pending: Some(pending),
        }
    }

    /// True when an on-chain transaction has already executed for this
    /// issuance. Such failures require human intervention.
    pub fn on_chain_effect(&self) -> bool {
        self.tx_id.is_some()
    }
}

/// Verification outcome for a miss or an unreachable store.
///
/// `NotFound` is absence, not a system fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Certificate not found")]
    NotFound,

    #[error("Certificate store unavailable: {0}")]
    StoreUnavailable(String),
}
