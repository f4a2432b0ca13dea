//! # RocksDB Certificate Store
//!
//! Durable store keyed by fingerprint. RocksDB has no unique constraint of
//! its own, so inserts take a single writer mutex and do check-then-put
//! inside it; the second insert for a fingerprint is rejected, never
//! overwritten. Reads go straight to the database.
//!
//! Records are stored as JSON documents; the store assigns the record id
//! and creation timestamp at insert.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use rocksdb::{Options, DB};
use tracing::info;
use uuid::Uuid;

use proofchain_core::{
    CertificateRecord, CertificateStore, NewCertificateRecord, RecordId, StoreError,
};

/// RocksDB-backed certificate store.
pub struct RocksDbStore {
    db: Arc<DB>,
    write_lock: Mutex<()>,
}

impl RocksDbStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path.as_ref())
            .map_err(|e| StoreError::Unavailable(format!("failed to open database: {e}")))?;

        info!(path = %path.as_ref().display(), "certificate store opened");
        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    fn decode(bytes: &[u8]) -> Result<CertificateRecord, StoreError> {
        serde_json::from_slice(bytes)
            .map_err(|e| StoreError::Unavailable(format!("corrupt record: {e}")))
    }
}

#[async_trait::async_trait]
impl CertificateStore for RocksDbStore {
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
        let value = serde_json::to_vec(&stored)
            .map_err(|e| StoreError::Unavailable(format!("encode failed: {e}")))?;

        // Check-then-put must be atomic with respect to other inserts.
        let _guard = self.write_lock.lock();
        let existing = self
            .db
            .get(stored.certificate_hash.as_bytes())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if existing.is_some() {
            return Err(StoreError::DuplicateHash {
                hash: stored.certificate_hash,
            });
        }
        self.db
            .put(stored.certificate_hash.as_bytes(), &value)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(stored)
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<CertificateRecord>, StoreError> {
        let found = self
            .db
            .get(hash.as_bytes())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        found.as_deref().map(Self::decode).transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .property_value("rocksdb.estimate-num-keys")
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proofchain_core::{Fingerprint, TransactionId};

    fn new_record(name: &str, millis: i64) -> NewCertificateRecord {
        NewCertificateRecord {
            student_name: name.into(),
            course: "CS101".into(),
            certificate_hash: Fingerprint::derive(name, "CS101", millis).unwrap(),
            tx_id: TransactionId("TX1".into()),
        }
    }

    #[tokio::test]
    async fn insert_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let hash;
        {
            let store = RocksDbStore::open(dir.path()).unwrap();
            hash = store
                .insert(new_record("Alice", 1))
                .await
                .unwrap()
                .certificate_hash;
        }

        let store = RocksDbStore::open(dir.path()).unwrap();
        let found = store.find_by_hash(&hash).await.unwrap().unwrap();
        assert_eq!(found.student_name, "Alice");
        assert_eq!(found.tx_id, "TX1");
    }

    #[tokio::test]
    async fn duplicate_hash_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let first = store.insert(new_record("Alice", 1)).await.unwrap();
        let err = store.insert(new_record("Alice", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateHash { .. }));

        let found = store
            .find_by_hash(&first.certificate_hash)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn ping_succeeds_on_open_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();
        assert!(store.ping().await.is_ok());
    }
}
