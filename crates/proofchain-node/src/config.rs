//! # Node Configuration
//!
//! Environment-driven configuration. The issuer seed is required; everything
//! else has a sane default. Missing or malformed required configuration
//! fails `from_env`, which halts startup.

use std::path::PathBuf;

use thiserror::Error;

/// Default algod endpoint (public testnet gateway).
const DEFAULT_ALGOD_URL: &str = "https://testnet-api.algonode.cloud";
/// Default on-disk location of the certificate store.
const DEFAULT_DB_PATH: &str = "./data/certificates";
/// Default HTTP port.
const DEFAULT_PORT: u16 = 5000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Base URL of the algod REST endpoint.
    pub algod_url: String,
    /// Hex-encoded 32-byte Ed25519 issuer seed.
    pub issuer_seed_hex: String,
    /// Directory of the certificate store.
    pub db_path: PathBuf,
    /// HTTP listen port.
    pub port: u16,
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let issuer_seed_hex = std::env::var("PROOFCHAIN_ISSUER_SEED")
            .map_err(|_| ConfigError::MissingVar("PROOFCHAIN_ISSUER_SEED"))?;

        let algod_url =
            std::env::var("PROOFCHAIN_ALGOD_URL").unwrap_or_else(|_| DEFAULT_ALGOD_URL.into());

        let db_path = std::env::var("PROOFCHAIN_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "PORT",
                reason: format!("not a port number: {raw}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            algod_url,
            issuer_seed_hex,
            db_path,
            port,
        })
    }
}
