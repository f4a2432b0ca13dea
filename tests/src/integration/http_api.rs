//! # HTTP API Tests
//!
//! The full router exercised request-to-response: wire bodies, status
//! codes, and the reconciliation markers on post-broadcast failures.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use proofchain_core::test_support::{MockLedger, MockLedgerFailure, MockStore};
    use proofchain_core::{IssuanceCoordinator, LedgerError, SystemClock, VerificationService};
    use proofchain_gateway::{create_router, AppState};

    const ISSUER: &str = "TESTISSUERADDRESS";

    fn app(ledger: Arc<MockLedger>, store: MockStore) -> Router {
        let coordinator =
            IssuanceCoordinator::new(Arc::clone(&ledger), store.clone(), SystemClock);
        let verifier = VerificationService::new(store.clone());
        create_router(AppState {
            issuance: Arc::new(coordinator),
            verification: Arc::new(verifier),
            store: Arc::new(store),
            issuer_address: ISSUER.into(),
        })
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn mint_then_verify_round_trip() {
        let app = app(Arc::new(MockLedger::healthy()), MockStore::new());

        let (status, body) = post_json(
            &app,
            "/mint",
            json!({"studentName": "Alice", "course": "CS101"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["txId"], MockLedger::tx_id().as_str());
        let hash = body["certificateHash"].as_str().unwrap();
        assert_eq!(hash.len(), 64);

        let (status, body) = get(&app, &format!("/verify/{hash}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["certificate"]["studentName"], "Alice");
        assert_eq!(body["certificate"]["course"], "CS101");
        assert_eq!(body["certificate"]["certificateHash"], hash);
    }

    #[tokio::test]
    async fn empty_student_name_is_rejected_without_collaborator_calls() {
        let ledger = Arc::new(MockLedger::healthy());
        let store = MockStore::new();
        let app = app(Arc::clone(&ledger), store.clone());

        let (status, body) =
            post_json(&app, "/mint", json!({"studentName": "", "course": "CS101"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Student name and course required");
        assert_eq!(ledger.params_calls(), 0);
        assert_eq!(ledger.broadcast_calls(), 0);
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn missing_student_name_field_is_rejected_like_an_empty_one() {
        let ledger = Arc::new(MockLedger::healthy());
        let store = MockStore::new();
        let app = app(Arc::clone(&ledger), store.clone());

        let (status, body) = post_json(&app, "/mint", json!({"course": "CS101"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Student name and course required");
        assert_eq!(ledger.params_calls(), 0);
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn unreachable_ledger_maps_to_service_unavailable() {
        let ledger = Arc::new(MockLedger::failing(MockLedgerFailure::Params(
            LedgerError::Unavailable("connection refused".into()),
        )));
        let app = app(ledger, MockStore::new());

        let (status, body) = post_json(
            &app,
            "/mint",
            json!({"studentName": "Alice", "course": "CS101"}),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Unable to connect"));
    }

    #[tokio::test]
    async fn store_outage_after_broadcast_reports_tx_id_for_reconciliation() {
        let ledger = Arc::new(MockLedger::healthy());
        let app = app(Arc::clone(&ledger), MockStore::unavailable());

        let (status, body) = post_json(
            &app,
            "/mint",
            json!({"studentName": "Alice", "course": "CS101"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Failed to save certificate"));
        // The broadcast happened; its id is reported separately.
        assert_eq!(ledger.broadcast_calls(), 1);
        assert_eq!(body["txId"], MockLedger::tx_id().as_str());
        assert_eq!(body["onChain"], true);
    }

    #[tokio::test]
    async fn verify_unknown_hash_is_404() {
        let app = app(Arc::new(MockLedger::healthy()), MockStore::new());

        let (status, body) = get(&app, "/verify/nonexistent").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Certificate not found");
    }

    #[tokio::test]
    async fn verify_is_idempotent_over_http() {
        let app = app(Arc::new(MockLedger::healthy()), MockStore::new());
        let (_, body) = post_json(
            &app,
            "/mint",
            json!({"studentName": "Alice", "course": "CS101"}),
        )
        .await;
        let hash = body["certificateHash"].as_str().unwrap().to_string();

        let (s1, b1) = get(&app, &format!("/verify/{hash}")).await;
        let (s2, b2) = get(&app, &format!("/verify/{hash}")).await;
        assert_eq!(s1, s2);
        assert_eq!(b1, b2);
    }

    #[tokio::test]
    async fn health_reports_store_and_issuer() {
        let app = app(Arc::new(MockLedger::healthy()), MockStore::new());

        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storeConnected"], true);
        assert_eq!(body["issuer"], ISSUER);
    }

    #[tokio::test]
    async fn health_flags_a_down_store() {
        let app = app(Arc::new(MockLedger::healthy()), MockStore::unavailable());

        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["storeConnected"], false);
    }
}
