//! Magazine Store Reconciler Library
//!
//! Fetches a magazine catalog and its subscribers from a remote service,
//! finds the subscribers who own at least one magazine in every category,
//! and reports them back for verification.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
