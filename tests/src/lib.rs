//! # ProofChain Test Suite
//!
//! Unified test crate containing:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── issuance_flows.rs   # Coordinator against mock collaborators
//!     └── http_api.rs         # Full router: mint / verify / health
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p proofchain-tests
//! cargo test -p proofchain-tests integration::
//! ```

pub mod integration;
