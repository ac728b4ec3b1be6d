//! Domain layer for the vidgate query core
//!
//! This module contains the models, port traits and errors shared by the
//! services and the infrastructure adapters.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ProviderError, ProviderResult, StoreError, StoreResult};
