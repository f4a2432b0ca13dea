//! # Test Support
//!
//! Mock implementations of the outbound ports with call counters, used by
//! this crate's unit tests and the workspace end-to-end suite.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use crate::domain::entities::{
    CertificateRecord, NetworkParams, NewCertificateRecord, RecordId, SignedTransaction,
    TransactionId,
};
use crate::domain::fingerprint::Fingerprint;
use crate::ports::outbound::{CertificateStore, Clock, LedgerError, LedgerGateway, StoreError};

/// Clock pinned to a fixed instant for deterministic fingerprints.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self(Utc.timestamp_millis_opt(millis).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Which ledger operation the mock should fail.
#[derive(Debug, Clone)]
pub enum MockLedgerFailure {
    Params(LedgerError),
    Sign(LedgerError),
    Broadcast(LedgerError),
}

/// Scripted ledger gateway counting every call.
#[derive(Default)]
pub struct MockLedger {
    failure: Option<MockLedgerFailure>,
    params_calls: AtomicUsize,
    sign_calls: AtomicUsize,
    broadcast_calls: AtomicUsize,
}

impl MockLedger {
    /// Ledger where every operation succeeds.
    pub fn healthy() -> Self {
        Self::default()
    }

    /// Ledger failing at exactly one operation.
    pub fn failing(failure: MockLedgerFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    /// The transaction id every successful mock broadcast returns.
    pub fn tx_id() -> TransactionId {
        TransactionId("MOCKTX7CXLQSGRTJLEE5BNH4ZBB4C5GQXG2EJVHMBBXLABC3QA".into())
    }

    pub fn params_calls(&self) -> usize {
        self.params_calls.load(Ordering::SeqCst)
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    pub fn broadcast_calls(&self) -> usize {
        self.broadcast_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LedgerGateway for MockLedger {
    async fn fetch_params(&self) -> Result<NetworkParams, LedgerError> {
        self.params_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(MockLedgerFailure::Params(e)) = &self.failure {
            return Err(e.clone());
        }
        Ok(NetworkParams {
            genesis_id: "testnet-v1.0".into(),
            genesis_hash: vec![0x4a; 32],
            first_valid: 1_000_001,
            last_valid: 1_001_000,
            fee: 1_000,
        })
    }

    fn build_and_sign(
        &self,
        fingerprint: &Fingerprint,
        _params: &NetworkParams,
    ) -> Result<SignedTransaction, LedgerError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(MockLedgerFailure::Sign(e)) = &self.failure {
            return Err(e.clone());
        }
        Ok(SignedTransaction {
            blob: fingerprint.as_str().as_bytes().to_vec(),
        })
    }

    async fn broadcast(
        &self,
        _signed: &SignedTransaction,
    ) -> Result<TransactionId, LedgerError> {
        self.broadcast_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(MockLedgerFailure::Broadcast(e)) = &self.failure {
            return Err(e.clone());
        }
        Ok(Self::tx_id())
    }
}

#[derive(Default)]
struct MockStoreInner {
    records: Mutex<HashMap<String, CertificateRecord>>,
    next_id: AtomicUsize,
    unavailable: bool,
    insert_calls: AtomicUsize,
    find_calls: AtomicUsize,
}

/// In-memory certificate store with call counters.
///
/// Clones share state, so the same store can back a coordinator and a
/// verification service in one test.
#[derive(Clone, Default)]
pub struct MockStore {
    inner: Arc<MockStoreInner>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every operation fails with `StoreError::Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            inner: Arc::new(MockStoreInner {
                unavailable: true,
                ..MockStoreInner::default()
            }),
        }
    }

    pub fn insert_calls(&self) -> usize {
        self.inner.insert_calls.load(Ordering::SeqCst)
    }

    pub fn find_calls(&self) -> usize {
        self.inner.find_calls.load(Ordering::SeqCst)
    }

    /// Seed a record directly, bypassing the issuance pipeline.
    pub async fn seed(
        &self,
        student_name: &str,
        course: &str,
        fingerprint: Fingerprint,
        tx_id: TransactionId,
    ) {
        let record = self.make_record(NewCertificateRecord {
            student_name: student_name.into(),
            course: course.into(),
            certificate_hash: fingerprint,
            tx_id,
        });
        self.inner
            .records
            .lock()
            .insert(record.certificate_hash.clone(), record);
    }

    fn make_record(&self, new: NewCertificateRecord) -> CertificateRecord {
        let n = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        CertificateRecord {
            id: RecordId(format!("rec-{n}")),
            student_name: new.student_name,
            course: new.course,
            certificate_hash: new.certificate_hash.into_string(),
            tx_id: new.tx_id.0,
            created_at: Utc::now(),
        }
    }
}

#[async_trait::async_trait]
impl CertificateStore for MockStore {
    async fn insert(
        &self,
        record: NewCertificateRecord,
    ) -> Result<CertificateRecord, StoreError> {
        self.inner.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.unavailable {
            return Err(StoreError::Unavailable("store down".into()));
        }

        let stored = self.make_record(record);
        let mut records = self.inner.records.lock();
        if records.contains_key(&stored.certificate_hash) {
            return Err(StoreError::DuplicateHash {
                hash: stored.certificate_hash,
            });
        }
        records.insert(stored.certificate_hash.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<CertificateRecord>, StoreError> {
        self.inner.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.unavailable {
            return Err(StoreError::Unavailable("store down".into()));
        }
        Ok(self.inner.records.lock().get(hash).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.inner.unavailable {
            return Err(StoreError::Unavailable("store down".into()));
        }
        Ok(())
    }
}
