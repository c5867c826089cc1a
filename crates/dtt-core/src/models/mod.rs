//! Data models for the publisher
//!
//! Catalog rows on one side (what gets submitted and what comes back), the
//! authoring project manifest on the other.

mod manifest;
mod story;

// Re-export all models for convenient imports
pub use manifest::*;
pub use story::*;
