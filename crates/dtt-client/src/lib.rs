//! HTTP clients for the Drive Time Tales catalog.
//!
//! Two routes in: the site's own REST API (`api`) for upload and insert
//! through the running web app, and the Supabase PostgREST endpoint
//! (`postgrest`) for inserting rows directly when publishing straight to
//! storage.

pub mod api;
pub mod postgrest;

use std::time::Duration;

use dtt_core::{PublishError, PublishResult};

pub(crate) fn build_client(timeout: Duration) -> PublishResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PublishError::Other(format!("Failed to create HTTP client: {}", e)))
}

/// Translate transport failures into the messages shown to the operator.
pub(crate) fn transport_error(base_url: &str, err: reqwest::Error) -> PublishError {
    if err.is_timeout() {
        PublishError::Timeout("Request timed out. File may be too large.".to_string())
    } else if err.is_connect() {
        PublishError::Connection(format!(
            "Could not connect to {}. Is Drive Time Tales running?",
            base_url
        ))
    } else {
        PublishError::Other(err.to_string())
    }
}

pub(crate) async fn read_error_body(response: reqwest::Response) -> PublishError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    PublishError::Rejected { status, body }
}
