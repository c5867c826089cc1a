//! Drive Time Tales Core Library
//!
//! This crate provides the domain models, metadata normalizer, asset naming,
//! configuration, and error types shared across all publisher components.

pub mod asset;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalize;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, PublishTargetKind};
pub use error::{PublishError, PublishResult};
pub use storage_types::StorageBackend;
