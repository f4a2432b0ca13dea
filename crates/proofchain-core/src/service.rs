//! # Issuance Coordinator
//!
//! Orchestrates Hash Deriver -> Ledger Gateway -> Certificate Store as an
//! explicit finite-state machine:
//!
//! ```text
//! Start -> Validated -> ParamsFetched -> Signed -> Broadcast -> Persisted
//!                                                            |
//!                                               Failed(stage, reason)
//! ```
//!
//! Each stage is a tagged state; every failure path names the stage it
//! occurred in. Within one issuance, stages execute strictly in sequence.
//! Concurrent issuances share only the read-only signer held by the ledger
//! gateway; the store's unique-fingerprint constraint is the sole guard
//! against duplicate persistence.
//!
//! ## Invariants
//!
//! - A certificate record is never persisted without a confirmed on-chain
//!   transaction identifier.
//! - No stage is retried automatically.
//! - Failures after broadcast carry the transaction id: the on-chain effect
//!   cannot be undone, and the inconsistency must be surfaced, not masked.

use tracing::{info, warn};

use crate::domain::entities::{
    CertificateRequest, IssuedCertificate, NetworkParams, NewCertificateRecord,
    SignedTransaction, TransactionId,
};
use crate::domain::errors::{IssuanceError, IssuanceFailure, Stage};
use crate::domain::fingerprint::Fingerprint;
use crate::ports::inbound::IssuanceApi;
use crate::ports::outbound::{CertificateStore, Clock, LedgerError, LedgerGateway, StoreError};

// Tagged state per completed stage. Each stage method consumes its
// predecessor's state, so the compiler enforces the sequencing.

#[derive(Debug)]
struct Validated {
    fingerprint: Fingerprint,
}

#[derive(Debug)]
struct ParamsFetched {
    fingerprint: Fingerprint,
    params: NetworkParams,
}

#[derive(Debug)]
struct Signed {
    fingerprint: Fingerprint,
    signed: SignedTransaction,
}

#[derive(Debug)]
struct Broadcast {
    fingerprint: Fingerprint,
    tx_id: TransactionId,
}

/// Issuance coordinator wiring the ports together.
///
/// Each issuance request is an independent unit of work; no lock is held
/// across a suspension point.
pub struct IssuanceCoordinator<L, S, C> {
    ledger: L,
    store: S,
    clock: C,
}

impl<L, S, C> IssuanceCoordinator<L, S, C>
where
    L: LedgerGateway,
    S: CertificateStore,
    C: Clock,
{
    pub fn new(ledger: L, store: S, clock: C) -> Self {
        Self {
            ledger,
            store,
            clock,
        }
    }

    /// `Start -> Validated`: derive the fingerprint. On `InvalidRequest`,
    /// fail without contacting the ledger or store.
    fn validate(&self, request: &CertificateRequest) -> Result<Validated, IssuanceFailure> {
        let issued_at = self.clock.now().timestamp_millis();
        let fingerprint =
            Fingerprint::derive(&request.student_name, &request.course, issued_at).map_err(
                |_| IssuanceFailure::new(Stage::Validation, IssuanceError::InvalidRequest),
            )?;

        Ok(Validated { fingerprint })
    }

    /// `Validated -> ParamsFetched`.
    async fn fetch_params(&self, state: Validated) -> Result<ParamsFetched, IssuanceFailure> {
        let params = self.ledger.fetch_params().await.map_err(|e| {
            warn!(error = %e, "failed to fetch ledger params");
            IssuanceFailure::new(Stage::Params, map_ledger_error(e))
        })?;

        Ok(ParamsFetched {
            fingerprint: state.fingerprint,
            params,
        })
    }

    /// `ParamsFetched -> Signed`. A signing failure is a fatal configuration
    /// problem upstream, not retried.
    fn sign(&self, state: ParamsFetched) -> Result<Signed, IssuanceFailure> {
        let signed = self
            .ledger
            .build_and_sign(&state.fingerprint, &state.params)
            .map_err(|e| IssuanceFailure::new(Stage::Sign, map_ledger_error(e)))?;

        Ok(Signed {
            fingerprint: state.fingerprint,
            signed,
        })
    }

    /// `Signed -> Broadcast`. Past this point the on-chain effect is
    /// unrecoverable; a record is never persisted without the returned
    /// transaction id.
    async fn broadcast(&self, state: Signed) -> Result<Broadcast, IssuanceFailure> {
        let tx_id = self.ledger.broadcast(&state.signed).await.map_err(|e| {
            warn!(error = %e, "broadcast failed");
            IssuanceFailure::new(Stage::Broadcast, map_ledger_error(e))
        })?;

        info!(%tx_id, hash = %state.fingerprint, "transaction broadcast");
        Ok(Broadcast {
            fingerprint: state.fingerprint,
            tx_id,
        })
    }

    /// `Broadcast -> Persisted`. The ledger transaction has already executed;
    /// a failure here is a known on-chain/off-chain inconsistency and is
    /// surfaced with the transaction id for reconciliation.
    async fn persist(
        &self,
        request: &CertificateRequest,
        state: Broadcast,
    ) -> Result<IssuedCertificate, IssuanceFailure> {
        let Broadcast { fingerprint, tx_id } = state;

        let record = NewCertificateRecord {
            student_name: request.student_name.clone(),
            course: request.course.clone(),
            certificate_hash: fingerprint.clone(),
            tx_id: tx_id.clone(),
        };

        match self.store.insert(record.clone()).await {
            Ok(stored) => {
                info!(record_id = %stored.id, %tx_id, "certificate persisted");
                Ok(IssuedCertificate {
                    record_id: stored.id,
                    tx_id,
                    certificate_hash: fingerprint,
                })
            }
            Err(e) => {
                warn!(error = %e, %tx_id, "persistence failed after broadcast");
                Err(IssuanceFailure::after_broadcast(
                    Stage::Persist,
                    map_store_error(e),
                    tx_id,
                    record,
                ))
            }
        }
    }
}

fn map_ledger_error(e: LedgerError) -> IssuanceError {
    match e {
        LedgerError::Unavailable(msg) => IssuanceError::LedgerUnavailable(msg),
        LedgerError::Signing(msg) => IssuanceError::SigningError(msg),
        LedgerError::BroadcastRejected(msg) => IssuanceError::BroadcastRejected(msg),
    }
}

fn map_store_error(e: StoreError) -> IssuanceError {
    match e {
        StoreError::DuplicateHash { hash } => IssuanceError::DuplicateHash { hash },
        StoreError::Unavailable(msg) => IssuanceError::StoreUnavailable(msg),
    }
}

#[async_trait::async_trait]
impl<L, S, C> IssuanceApi for IssuanceCoordinator<L, S, C>
where
    L: LedgerGateway,
    S: CertificateStore,
    C: Clock,
{
    async fn issue(
        &self,
        request: CertificateRequest,
    ) -> Result<IssuedCertificate, IssuanceFailure> {
        let state = self.validate(&request)?;
        let state = self.fetch_params(state).await?;
        let state = self.sign(state)?;
        let state = self.broadcast(state).await?;
        self.persist(&request, state).await
    }
}
