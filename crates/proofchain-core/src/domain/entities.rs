//! # Domain Entities
//!
//! Core data structures shared across the issuance pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fingerprint::Fingerprint;

/// Transient issuance input. Not persisted directly.
///
/// Missing wire fields deserialize as empty strings so they reach the
/// validator and fail as `InvalidRequest` rather than as a decode error.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub course: String,
}

/// Ledger transaction identifier as returned by the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned record identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current network parameters required to build a valid transaction.
///
/// Fetched from the ledger immediately before signing; validity windows are
/// round-based, so stale parameters produce rejected transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkParams {
    /// Human-readable network identifier (e.g. `testnet-v1.0`).
    pub genesis_id: String,
    /// Raw genesis hash binding the transaction to one network.
    pub genesis_hash: Vec<u8>,
    /// First round in which the transaction is valid.
    pub first_valid: u64,
    /// Last round in which the transaction is valid.
    pub last_valid: u64,
    /// Flat fee in the network's base unit.
    pub fee: u64,
}

/// A fully signed transaction blob, ready for broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Wire-encoded signed transaction bytes.
    pub blob: Vec<u8>,
}

/// Record to be persisted. The store assigns `id` and `created_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCertificateRecord {
    pub student_name: String,
    pub course: String,
    pub certificate_hash: Fingerprint,
    pub tx_id: TransactionId,
}

/// Persisted certificate record. Never mutated or deleted after creation.
///
/// `certificate_hash` is the unique key; duplicate-hash rejection in the
/// store is the sole guard against duplicate persistence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub id: RecordId,
    pub student_name: String,
    pub course: String,
    pub certificate_hash: String,
    pub tx_id: String,
    pub created_at: DateTime<Utc>,
}

/// Successful issuance outcome.
#[derive(Clone, Debug)]
pub struct IssuedCertificate {
    pub record_id: RecordId,
    pub tx_id: TransactionId,
    pub certificate_hash: Fingerprint,
}
