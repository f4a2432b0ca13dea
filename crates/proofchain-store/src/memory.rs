//! In-memory certificate store. HashMap under a mutex; insert is
//! check-and-put within one critical section, so duplicate rejection is
//! atomic.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use proofchain_core::{
    CertificateRecord, CertificateStore, NewCertificateRecord, RecordId, StoreError,
};

/// Process-local certificate store. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, CertificateRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait::async_trait]
impl CertificateStore for MemoryStore {
    async fn insert(
        &self,
        record: NewCertificateRecord,
    ) -> Result<CertificateRecord, StoreError> {
        let stored = CertificateRecord {
            id: RecordId(Uuid::new_v4().to_string()),
            student_name: record.student_name,
            course: record.course,
            certificate_hash: record.certificate_hash.into_string(),
            tx_id: record.tx_id.0,
            created_at: Utc::now(),
        };

        let mut records = self.records.lock();
        if records.contains_key(&stored.certificate_hash) {
            return Err(StoreError::DuplicateHash {
                hash: stored.certificate_hash,
            });
        }
        records.insert(stored.certificate_hash.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<CertificateRecord>, StoreError> {
        Ok(self.records.lock().get(hash).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
