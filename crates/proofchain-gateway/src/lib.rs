//! # ProofChain Gateway
//!
//! HTTP surface for the issuance core:
//!
//! - `POST /mint`: issue a certificate
//! - `GET /verify/:hash`: look up a certificate by fingerprint
//! - `GET /health`: store connectivity and issuer identity, no side effects
//!
//! The gateway is a thin adapter: it maps wire JSON to the inbound ports and
//! issuance outcomes to HTTP statuses. Failures after broadcast carry the
//! transaction id and an `onChain` marker, because at that point an on-chain
//! transaction has already executed and someone has to reconcile it.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use proofchain_core::{CertificateStore, IssuanceApi, VerificationApi};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub issuance: Arc<dyn IssuanceApi>,
    pub verification: Arc<dyn VerificationApi>,
    pub store: Arc<dyn CertificateStore>,
    /// Issuer address reported by the health probe.
    pub issuer_address: String,
}

/// Build the application router with permissive CORS.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/mint", post(handlers::mint))
        .route("/verify/:hash", get(handlers::verify))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
