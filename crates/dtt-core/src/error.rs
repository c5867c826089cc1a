//! Error types for the publishing pipeline.
//!
//! Every failure class a publish run can hit is represented here so callers
//! can distinguish local problems (missing files, bad manifests, missing
//! tools) from remote ones (unreachable endpoint, timeout, rejected insert).

use thiserror::Error;

/// Publishing operation errors
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    // Connection and timeout messages are built fully formed at the call
    // site so the CLI can print them verbatim.
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Timeout(String),

    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Tool not found: {tool}")]
    ToolMissing { tool: String },

    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type for publishing operations
pub type PublishResult<T> = Result<T, PublishError>;
