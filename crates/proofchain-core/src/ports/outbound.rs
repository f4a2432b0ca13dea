//! # Outbound Ports (Driven Ports / SPI)
//!
//! Interfaces this crate requires the host application to implement.
//!
//! Production adapters: `proofchain-ledger` (algod REST) and
//! `proofchain-store` (RocksDB). Testing: `crate::test_support`.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::{
    CertificateRecord, NetworkParams, NewCertificateRecord, SignedTransaction, TransactionId,
};
use crate::domain::fingerprint::Fingerprint;

/// Error from ledger operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The remote endpoint is unreachable or returned a transport/protocol
    /// error. Timeouts classify here as well.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// Malformed key material. Should not occur in normal operation.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The network accepted the call but returned no usable transaction id.
    /// Distinct from transport failure: the on-chain effect is ambiguous and
    /// must not be treated as success.
    #[error("broadcast rejected: {0}")]
    BroadcastRejected(String),
}

/// Gateway to the distributed ledger.
///
/// `broadcast`, once it returns a transaction identifier, has unrecoverable
/// on-chain effect; there is no compensating transaction in this system.
#[async_trait::async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Fetch current network parameters.
    ///
    /// # Errors
    /// * `LedgerError::Unavailable` - endpoint unreachable, protocol error,
    ///   or timeout
    async fn fetch_params(&self) -> Result<NetworkParams, LedgerError>;

    /// Construct and sign the unit-supply asset-creation transaction whose
    /// metadata URL embeds `fingerprint`. Local operation, no network I/O.
    ///
    /// # Errors
    /// * `LedgerError::Signing` - malformed key material (fatal upstream)
    fn build_and_sign(
        &self,
        fingerprint: &Fingerprint,
        params: &NetworkParams,
    ) -> Result<SignedTransaction, LedgerError>;

    /// Submit the signed transaction to the network.
    ///
    /// # Errors
    /// * `LedgerError::Unavailable` - transport failure or timeout
    /// * `LedgerError::BroadcastRejected` - accepted but no usable tx id
    async fn broadcast(&self, signed: &SignedTransaction)
        -> Result<TransactionId, LedgerError>;
}

#[async_trait::async_trait]
impl<T: LedgerGateway + ?Sized> LedgerGateway for std::sync::Arc<T> {
    async fn fetch_params(&self) -> Result<NetworkParams, LedgerError> {
        (**self).fetch_params().await
    }

    fn build_and_sign(
        &self,
        fingerprint: &Fingerprint,
        params: &NetworkParams,
    ) -> Result<SignedTransaction, LedgerError> {
        (**self).build_and_sign(fingerprint, params)
    }

    async fn broadcast(
        &self,
        signed: &SignedTransaction,
    ) -> Result<TransactionId, LedgerError> {
        (**self).broadcast(signed).await
    }
}

/// Error from certificate store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this fingerprint already exists. The store rejects the
    /// second insert atomically; it never overwrites.
    #[error("duplicate certificate hash: {hash}")]
    DuplicateHash { hash: String },

    /// The backing store is unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable keyed storage for issued certificates.
///
/// The uniqueness constraint on the fingerprint is the only synchronization
/// primitive relied upon to prevent duplicate persistence.
#[async_trait::async_trait]
pub trait CertificateStore: Send + Sync {
    /// Persist a new record, assigning its id and creation timestamp.
    async fn insert(&self, record: NewCertificateRecord)
        -> Result<CertificateRecord, StoreError>;

    /// Look up a record by fingerprint. `Ok(None)` is absence, not failure.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<CertificateRecord>, StoreError>;

    /// Connectivity probe for health reporting. No side effects.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<T: CertificateStore + ?Sized> CertificateStore for std::sync::Arc<T> {
    async fn insert(
        &self,
        record: NewCertificateRecord,
    ) -> Result<CertificateRecord, StoreError> {
        (**self).insert(record).await
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<CertificateRecord>, StoreError> {
        (**self).find_by_hash(hash).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}

/// Source of the issuance instant, injected for deterministic tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
