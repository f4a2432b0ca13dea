//! End-to-end scenarios across the issuance core, store adapters, and the
//! HTTP gateway.

pub mod http_api;
pub mod issuance_flows;
