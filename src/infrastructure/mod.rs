//! Infrastructure layer module
//!
//! This module contains the infrastructure adapters and external integrations:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - YouTube Data API client
//! - Durable store selection
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod store;
pub mod youtube;

pub use store::open_durable_store;
