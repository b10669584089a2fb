//! API handlers
//!
//! Each handler follows the same pattern:
//! - Extract state, path parameters and body using Axum extractors
//! - Validate the account ID and build the operation context
//! - Call the account service
//! - Map the result to the standardized response format

pub mod account;
pub mod health;
pub mod response;

// Re-export the response module for easy access
pub use response::{ApiListResponse, ApiResponse};
