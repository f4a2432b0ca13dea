//! # Algod REST Client
//!
//! Thin reqwest client for the two remote ledger operations: suggested
//! parameters and raw transaction broadcast. Every call is bounded by the
//! client-level timeout; timeouts and transport failures are converted to
//! `LedgerError::Unavailable` at this boundary and never escape raw.

use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use proofchain_core::{LedgerError, NetworkParams, TransactionId};

/// Rounds a transaction stays valid after the current round.
const VALIDITY_WINDOW: u64 = 1_000;

/// Default bound for each ledger round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Suggested transaction parameters as served by algod.
#[derive(Debug, Deserialize)]
struct SuggestedParamsResponse {
    #[serde(rename = "genesis-id")]
    genesis_id: String,
    #[serde(rename = "genesis-hash")]
    genesis_hash: String,
    #[serde(rename = "last-round")]
    last_round: u64,
    #[serde(default)]
    fee: u64,
    #[serde(rename = "min-fee", default)]
    min_fee: u64,
}

/// Broadcast response. algod spells the field `txId`; older gateways used
/// `txid`, so both are accepted.
#[derive(Debug, Deserialize)]
struct BroadcastResponse {
    #[serde(rename = "txId", alias = "txid")]
    tx_id: Option<String>,
}

/// REST client for an algod-compatible endpoint.
pub struct AlgodClient {
    http: Client,
    base_url: String,
}

impl AlgodClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, LedgerError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LedgerError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        let base_url = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /v2/transactions/params`
    pub async fn suggested_params(&self) -> Result<NetworkParams, LedgerError> {
        let url = format!("{}/v2/transactions/params", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;

        let params: SuggestedParamsResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Unavailable(format!("malformed params response: {e}")))?;

        let genesis_hash = general_purpose::STANDARD
            .decode(&params.genesis_hash)
            .map_err(|e| LedgerError::Unavailable(format!("malformed genesis hash: {e}")))?;

        debug!(
            genesis_id = %params.genesis_id,
            last_round = params.last_round,
            "fetched suggested params"
        );
        Ok(NetworkParams {
            genesis_id: params.genesis_id,
            genesis_hash,
            first_valid: params.last_round,
            last_valid: params.last_round + VALIDITY_WINDOW,
            fee: params.fee.max(params.min_fee),
        })
    }

    /// `POST /v2/transactions` with the wire-encoded signed transaction.
    ///
    /// A response without a usable transaction id is `BroadcastRejected`,
    /// never `Unavailable`: the endpoint answered, so the on-chain effect is
    /// ambiguous rather than absent.
    pub async fn send_raw(&self, blob: &[u8]) -> Result<TransactionId, LedgerError> {
        let url = format!("{}/v2/transactions", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/x-binary")
            .body(blob.to_vec())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body, "broadcast rejected by endpoint");
            return Err(LedgerError::BroadcastRejected(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        let parsed: BroadcastResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::BroadcastRejected(format!("unreadable response: {e}")))?;

        match parsed.tx_id.filter(|id| !id.is_empty()) {
            Some(id) => Ok(TransactionId(id)),
            None => Err(LedgerError::BroadcastRejected(
                "no transaction id in response".into(),
            )),
        }
    }
}

fn transport_error(e: reqwest::Error) -> LedgerError {
    if e.is_timeout() {
        LedgerError::Unavailable("request timed out".into())
    } else if e.is_connect() {
        LedgerError::Unavailable(format!("cannot connect: {e}"))
    } else {
        LedgerError::Unavailable(e.to_string())
    }
}
