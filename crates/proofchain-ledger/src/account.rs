//! # Issuer Account
//!
//! The single long-lived signing key, modeled as an injected capability so
//! tests can substitute it and keys can rotate without structural change.
//! The key is held in process memory only; there is no wallet custody.

use ed25519_dalek::{Signer, SigningKey};
use thiserror::Error;

use crate::encoding;

/// Malformed issuer key material. Fatal at startup, never at issuance time.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("issuer seed is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("issuer seed must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Signing capability required to author ledger transactions.
pub trait TransactionSigner: Send + Sync {
    /// Raw Ed25519 public key; doubles as the ledger account identifier.
    fn public_key(&self) -> [u8; 32];

    /// Sign an already domain-separated message.
    fn sign(&self, message: &[u8]) -> [u8; 64];
}

/// Ed25519 issuer account derived from a 32-byte seed.
#[derive(Debug)]
pub struct IssuerAccount {
    signing_key: SigningKey,
}

impl IssuerAccount {
    /// Create from a raw 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Create from a hex-encoded seed, the "equivalent secret" form supplied
    /// through process configuration.
    pub fn from_seed_hex(seed_hex: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(seed_hex.trim())?;
        let seed: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            KeyError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            }
        })?;
        Ok(Self::from_seed(seed))
    }

    /// Generate a random account, for tests and key provisioning.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Human-readable ledger address (base32 public key plus checksum).
    pub fn address(&self) -> String {
        encoding::address_from_public_key(&self.public_key())
    }
}

impl TransactionSigner for IssuerAccount {
    fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}
