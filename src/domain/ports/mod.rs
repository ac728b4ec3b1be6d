//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the query core depends on:
//! - DurableStore: persistent key-value storage
//! - VideoProvider: the upstream video search API
//! - Clock: time source, replaceable in tests

pub mod clock;
pub mod durable_store;
pub mod null_store;
pub mod video_provider;

pub use clock::{Clock, ManualClock, SystemClock};
pub use durable_store::DurableStore;
pub use null_store::NullStore;
pub use video_provider::VideoProvider;
