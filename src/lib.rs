//! Accounts storage workspace
//!
//! Re-exports the member crates so workspace-level integration tests can
//! reach them through one dependency.

pub use account_service;
pub use api_gateway;
pub use common;
