//! Route handlers. Each handler converts one inbound port call into a wire
//! response; no business logic lives here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use proofchain_core::{CertificateRequest, VerifyError};

use crate::responses::{mint_failure, Health, MintSuccess, SimpleFailure, VerifySuccess};
use crate::AppState;

/// `POST /mint`
pub async fn mint(
    State(state): State<AppState>,
    Json(request): Json<CertificateRequest>,
) -> Response {
    info!(course = %request.course, "mint request received");

    match state.issuance.issue(request).await {
        Ok(issued) => (StatusCode::OK, Json(MintSuccess::from(issued))).into_response(),
        Err(failure) => {
            let (status, body) = mint_failure(&failure);
            (status, Json(body)).into_response()
        }
    }
}

/// `GET /verify/:hash`
pub async fn verify(State(state): State<AppState>, Path(hash): Path<String>) -> Response {
    match state.verification.verify(&hash).await {
        Ok(certificate) => (
            StatusCode::OK,
            Json(VerifySuccess {
                success: true,
                certificate,
            }),
        )
            .into_response(),
        Err(VerifyError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(SimpleFailure::message("Certificate not found")),
        )
            .into_response(),
        Err(VerifyError::StoreUnavailable(msg)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SimpleFailure::error(format!(
                "Certificate store unavailable: {msg}"
            ))),
        )
            .into_response(),
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Response {
    let store_connected = state.store.ping().await.is_ok();
    (
        StatusCode::OK,
        Json(Health {
            status: "ok",
            store_connected,
            issuer: state.issuer_address.clone(),
        }),
    )
        .into_response()
}
