//! Homework API client modules
//!
//! A small, testable client for the homework status endpoint, split into
//! focused components: request execution, configuration, and error types.

pub mod api;
pub mod config;
pub mod error;

// Re-export main types for convenience
pub use api::HomeworkApi;
pub use config::ClientConfig;
pub use error::ClientError;
