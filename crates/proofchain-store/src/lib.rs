//! # ProofChain Store
//!
//! `CertificateStore` adapters. The store is keyed by certificate
//! fingerprint; the unique-key constraint is enforced atomically inside each
//! adapter (reject the second insert, never overwrite) and is the only
//! synchronization primitive the issuance pipeline relies on.
//!
//! There is no "is the store connected" flag anywhere: every operation fails
//! fast with `StoreError::Unavailable` when the backend cannot be reached.
//!
//! - `RocksDbStore`: durable production store.
//! - `MemoryStore`: process-local store for tests and demos.

pub mod memory;
pub mod rocks;

pub use memory::MemoryStore;
pub use rocks::RocksDbStore;
