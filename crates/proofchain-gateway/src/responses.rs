//! # Wire Responses
//!
//! JSON bodies and the HTTP status mapping for issuance outcomes:
//! validation failure 400, ledger unavailable 503, ambiguous broadcast 502,
//! duplicate hash 409, persistence failure after broadcast 500. The two
//! post-broadcast failures carry the transaction id and `onChain: true` so
//! the on-chain/off-chain inconsistency is never masked.

use axum::http::StatusCode;
use serde::Serialize;

use proofchain_core::{CertificateRecord, IssuanceError, IssuanceFailure, IssuedCertificate};

/// Successful mint body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintSuccess {
    pub success: bool,
    pub tx_id: String,
    pub certificate_hash: String,
}

impl From<IssuedCertificate> for MintSuccess {
    fn from(issued: IssuedCertificate) -> Self {
        Self {
            success: true,
            tx_id: issued.tx_id.0,
            certificate_hash: issued.certificate_hash.into_string(),
        }
    }
}

/// Failed mint body. `message` is used for caller errors, `error` for
/// infrastructure faults, mirroring the wire contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintFailure {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Transaction id of the already-executed broadcast, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    /// Marker that an on-chain transaction exists for this failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_chain: Option<bool>,
}

/// Successful verification body.
#[derive(Debug, Serialize)]
pub struct VerifySuccess {
    pub success: bool,
    pub certificate: CertificateRecord,
}

/// Generic failure body for verification and health errors.
#[derive(Debug, Serialize)]
pub struct SimpleFailure {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimpleFailure {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(text.into()),
            error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(text.into()),
        }
    }
}

/// Health probe body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub store_connected: bool,
    pub issuer: String,
}

/// Map an issuance failure to its HTTP status and body.
pub fn mint_failure(failure: &IssuanceFailure) -> (StatusCode, MintFailure) {
    let tx_id = failure.tx_id.as_ref().map(|id| id.0.clone());
    let on_chain = failure.on_chain_effect().then_some(true);

    let (status, message, error) = match &failure.error {
        IssuanceError::InvalidRequest => (
            StatusCode::BAD_REQUEST,
            Some(failure.error.to_string()),
            None,
        ),
        IssuanceError::LedgerUnavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            None,
            Some(failure.error.to_string()),
        ),
        IssuanceError::SigningError(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            Some(failure.error.to_string()),
        ),
        IssuanceError::BroadcastRejected(_) => (
            StatusCode::BAD_GATEWAY,
            None,
            Some(format!(
                "{}; on-chain state is uncertain, do not retry blindly",
                failure.error
            )),
        ),
        IssuanceError::DuplicateHash { .. } => (
            StatusCode::CONFLICT,
            None,
            Some(format!(
                "{}; the on-chain transaction already executed",
                failure.error
            )),
        ),
        IssuanceError::StoreUnavailable(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            Some(format!(
                "Failed to save certificate: {}; the on-chain transaction already executed",
                failure.error
            )),
        ),
    };

    (
        status,
        MintFailure {
            success: false,
            message,
            error,
            tx_id,
            on_chain,
        },
    )
}
