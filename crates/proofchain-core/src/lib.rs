//! # ProofChain Core
//!
//! Issuance and verification logic for tamper-evident academic certificates.
//! A certificate is fingerprinted, minted as a unit-supply asset on a
//! distributed ledger, and persisted off-chain; third parties verify by hash.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Entities, fingerprint derivation, error
//!   taxonomy. Pure logic, no I/O.
//! - **Ports Layer** (`ports/`): Trait definitions for inbound (issue/verify)
//!   and outbound (ledger, store, clock) interfaces.
//! - **Service Layer** (`service.rs`, `verification.rs`): The issuance
//!   coordinator state machine and the read-only verification service.
//!
//! ## Commit protocol
//!
//! The coordinator drives `Validated -> ParamsFetched -> Signed -> Broadcast
//! -> Persisted`. The single most important invariant: a certificate record
//! is never persisted without a confirmed on-chain transaction identifier.
//! A broadcast has unrecoverable on-chain effect, so any failure after it
//! carries the transaction id for manual reconciliation.

pub mod domain;
pub mod ports;
pub mod service;
pub mod test_support;
pub mod verification;

pub use domain::entities::{
    CertificateRecord, CertificateRequest, IssuedCertificate, NetworkParams, NewCertificateRecord,
    RecordId, SignedTransaction, TransactionId,
};
pub use domain::errors::{IssuanceError, IssuanceFailure, Stage, VerifyError};
pub use domain::fingerprint::{Fingerprint, InvalidRequest};
pub use ports::inbound::{IssuanceApi, VerificationApi};
pub use ports::outbound::{
    CertificateStore, Clock, LedgerError, LedgerGateway, StoreError, SystemClock,
};
pub use service::IssuanceCoordinator;
pub use verification::VerificationService;
