//! Common types and utilities for the accounts storage service
//!
//! This library contains shared types used across the storage backends,
//! the service layer and the HTTP gateway. It provides a unified approach to
//! error handling, operation cancellation and the account domain model.

pub mod context;
pub mod error;
pub mod model;

/// Re-export important types
pub use context::Context;
pub use error::{Error, ErrorExt, Result};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
