//! # Issuance Flow Tests
//!
//! The coordinator driven end to end against the real in-memory store and a
//! scripted ledger: healthy path, partial failures, and the post-broadcast
//! inconsistency surface.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proofchain_core::test_support::{FixedClock, MockLedger, MockLedgerFailure};
    use proofchain_core::{
        CertificateRequest, IssuanceApi, IssuanceCoordinator, IssuanceError, LedgerError, Stage,
        SystemClock, VerificationApi, VerificationService, VerifyError,
    };
    use proofchain_store::MemoryStore;

    fn request(name: &str, course: &str) -> CertificateRequest {
        CertificateRequest {
            student_name: name.to_string(),
            course: course.to_string(),
        }
    }

    #[tokio::test]
    async fn issued_certificate_is_verifiable_by_its_hash() {
        let store = MemoryStore::new();
        let coordinator =
            IssuanceCoordinator::new(MockLedger::healthy(), store.clone(), SystemClock);
        let verifier = VerificationService::new(store);

        let issued = coordinator.issue(request("Alice", "CS101")).await.unwrap();
        assert_eq!(issued.certificate_hash.as_str().len(), 64);
        assert!(!issued.tx_id.as_str().is_empty());

        let record = verifier
            .verify(issued.certificate_hash.as_str())
            .await
            .unwrap();
        assert_eq!(record.student_name, "Alice");
        assert_eq!(record.course, "CS101");
        assert_eq!(record.tx_id, issued.tx_id.as_str());
        assert_eq!(record.certificate_hash, issued.certificate_hash.as_str());
    }

    #[tokio::test]
    async fn resubmission_at_a_later_instant_creates_a_second_certificate() {
        let store = MemoryStore::new();
        let coordinator =
            IssuanceCoordinator::new(MockLedger::healthy(), store.clone(), SystemClock);

        let first = coordinator.issue(request("Alice", "CS101")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = coordinator.issue(request("Alice", "CS101")).await.unwrap();

        // Time is part of the preimage; no de-duplication window exists.
        assert_ne!(first.certificate_hash, second.certificate_hash);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn same_instant_resubmission_is_a_duplicate_with_the_real_tx_id() {
        let store = MemoryStore::new();
        let coordinator = IssuanceCoordinator::new(
            MockLedger::healthy(),
            store.clone(),
            FixedClock::at_millis(1_700_000_000_000),
        );

        coordinator.issue(request("Alice", "CS101")).await.unwrap();
        let failure = coordinator
            .issue(request("Alice", "CS101"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Persist);
        assert!(matches!(failure.error, IssuanceError::DuplicateHash { .. }));
        assert!(failure.on_chain_effect());
        assert_eq!(failure.tx_id, Some(MockLedger::tx_id()));
        // The store kept the first record only.
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn ledger_outage_leaves_the_store_untouched() {
        let store = MemoryStore::new();
        let ledger = MockLedger::failing(MockLedgerFailure::Params(LedgerError::Unavailable(
            "connection refused".into(),
        )));
        let coordinator = IssuanceCoordinator::new(ledger, store.clone(), SystemClock);

        let failure = coordinator
            .issue(request("Alice", "CS101"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Params);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn verify_misses_cleanly_when_nothing_was_issued() {
        let verifier = VerificationService::new(MemoryStore::new());
        assert_eq!(
            verifier.verify("nonexistent").await,
            Err(VerifyError::NotFound)
        );
    }

    #[tokio::test]
    async fn real_ledger_adapter_classifies_an_unreachable_endpoint() {
        use proofchain_ledger::{AlgodClient, AlgodLedger, IssuerAccount};

        // Nothing listens on port 1; the params fetch must surface as a
        // ledger-unavailable failure at the params stage, not a panic or a
        // raw transport error.
        let client = AlgodClient::new("http://127.0.0.1:1").unwrap();
        let ledger = AlgodLedger::new(client, IssuerAccount::from_seed([7u8; 32]));
        let store = MemoryStore::new();
        let coordinator = IssuanceCoordinator::new(ledger, store.clone(), SystemClock);

        let failure = coordinator
            .issue(request("Alice", "CS101"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Params);
        assert!(matches!(failure.error, IssuanceError::LedgerUnavailable(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn concurrent_issuances_all_persist() {
        let store = MemoryStore::new();
        let coordinator = Arc::new(IssuanceCoordinator::new(
            MockLedger::healthy(),
            store.clone(),
            SystemClock,
        ));

        let mut handles = Vec::new();
        for i in 0..8 {
            let coordinator = Arc::clone(&coordinator);
            handles.push(tokio::spawn(async move {
                coordinator
                    .issue(CertificateRequest {
                        student_name: format!("Student {i}"),
                        course: "CS101".into(),
                    })
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.len(), 8);
    }
}
