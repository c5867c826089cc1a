//! Storage backends for published story assets
//!
//! Provides the Storage trait and implementations for S3-compatible object
//! stores (Cloudflare R2 included) and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are `{folder}/{object-name}` where folder is one of `stories`,
//! `covers` or `samples`. Keys must not contain `..` or a leading `/`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use dtt_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
