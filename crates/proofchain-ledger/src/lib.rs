//! # ProofChain Ledger Adapter
//!
//! `LedgerGateway` implementation for an Algorand-style `algod` REST
//! endpoint. Fetches suggested transaction parameters, builds and signs the
//! unit-supply asset-creation transaction that notarizes one certificate,
//! and broadcasts the signed blob.
//!
//! ## Modules
//!
//! - `account`: the issuer signing capability (`TransactionSigner` trait,
//!   Ed25519 `IssuerAccount`)
//! - `encoding`: canonical msgpack transaction encoding, base32, tx ids
//! - `client`: the reqwest-based algod client with bounded timeouts
//!
//! ## Error classification
//!
//! Transport failures and timeouts surface as `LedgerError::Unavailable`.
//! A broadcast the endpoint answered without a usable transaction id
//! surfaces as `LedgerError::BroadcastRejected`: the on-chain effect is
//! ambiguous in that case and is never treated as success.

pub mod account;
pub mod client;
pub mod encoding;

use proofchain_core::{
    Fingerprint, LedgerError, LedgerGateway, NetworkParams, SignedTransaction, TransactionId,
};
use tracing::debug;

pub use account::{IssuerAccount, KeyError, TransactionSigner};
pub use client::AlgodClient;
use encoding::AssetCreateTransaction;

/// Asset name recorded on-chain for every certificate.
pub const ASSET_NAME: &str = "ProofChain Certificate";
/// Unit label of the single indivisible asset unit.
pub const UNIT_NAME: &str = "CERT";
/// Base URL the fingerprint is embedded into as asset metadata.
pub const CERT_URL_BASE: &str = "https://proofchain.app/cert";

/// Ledger gateway backed by an algod REST endpoint and an injected signer.
///
/// The signer is read-only shared state; concurrent issuances never mutate
/// it.
pub struct AlgodLedger<S> {
    client: AlgodClient,
    signer: S,
}

impl<S: TransactionSigner> AlgodLedger<S> {
    pub fn new(client: AlgodClient, signer: S) -> Self {
        Self { client, signer }
    }

    /// Issuer address in the ledger's human-readable form, for health
    /// reporting.
    pub fn issuer_address(&self) -> String {
        encoding::address_from_public_key(&self.signer.public_key())
    }
}

#[async_trait::async_trait]
impl<S: TransactionSigner> LedgerGateway for AlgodLedger<S> {
    async fn fetch_params(&self) -> Result<NetworkParams, LedgerError> {
        self.client.suggested_params().await
    }

    fn build_and_sign(
        &self,
        fingerprint: &Fingerprint,
        params: &NetworkParams,
    ) -> Result<SignedTransaction, LedgerError> {
        let txn = AssetCreateTransaction {
            sender: self.signer.public_key(),
            asset_name: ASSET_NAME,
            unit_name: UNIT_NAME,
            url: format!("{CERT_URL_BASE}/{fingerprint}"),
            total: 1,
            params,
        };

        let encoded = txn.encode();
        let signature = self.signer.sign(&encoding::domain_separated(&encoded));
        let blob = encoding::encode_signed(&signature, &encoded);

        debug!(
            tx_id = %encoding::transaction_id(&encoded),
            hash = %fingerprint,
            "asset-create transaction signed"
        );
        Ok(SignedTransaction { blob })
    }

    async fn broadcast(
        &self,
        signed: &SignedTransaction,
    ) -> Result<TransactionId, LedgerError> {
        self.client.send_raw(&signed.blob).await
    }
}
