//! Domain layer: entities, fingerprint derivation, and the error taxonomy.

pub mod entities;
pub mod errors;
pub mod fingerprint;
