//! # ProofChain Node
//!
//! Service binary wiring the issuance core to its production adapters:
//! algod ledger gateway, RocksDB certificate store, axum HTTP gateway.
//!
//! ## Startup Sequence
//!
//! 1. Initialize tracing (env-filter, default `info`)
//! 2. Load configuration from the environment (halt if incomplete)
//! 3. Decode the issuer key (halt on malformed key material)
//! 4. Open the certificate store (halt if unavailable)
//! 5. Serve HTTP until ctrl-c

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use proofchain_core::{IssuanceCoordinator, SystemClock, VerificationService};
use proofchain_gateway::{create_router, AppState};
use proofchain_ledger::{AlgodClient, AlgodLedger, IssuerAccount};
use proofchain_store::RocksDbStore;

use crate::config::NodeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("ProofChain node starting");

    let config = NodeConfig::from_env().context("configuration incomplete")?;

    let issuer = IssuerAccount::from_seed_hex(&config.issuer_seed_hex)
        .context("failed to decode issuer seed")?;
    let issuer_address = issuer.address();
    info!(%issuer_address, "issuer account loaded");

    let client = AlgodClient::new(&config.algod_url)
        .context("failed to construct ledger client")?;
    let ledger = AlgodLedger::new(client, issuer);
    info!(url = %config.algod_url, "ledger endpoint configured");

    let store = Arc::new(
        RocksDbStore::open(&config.db_path).context("failed to open certificate store")?,
    );

    let issuance = IssuanceCoordinator::new(ledger, Arc::clone(&store), SystemClock);
    let verification = VerificationService::new(Arc::clone(&store));

    let state = AppState {
        issuance: Arc::new(issuance),
        verification: Arc::new(verification),
        store,
        issuer_address,
    };
    let router = create_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("ProofChain node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
}
