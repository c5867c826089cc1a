//! Client for the Drive Time Tales site API.
//!
//! Covers the three endpoints publishing needs: `PUT /api/upload` for
//! asset files, `POST /api/stories` for the catalog insert, and
//! `GET /api/stories` for listing.

use std::path::Path;
use std::time::Duration;

use dtt_core::models::{PublishedStory, StoryQuery, StoryRecord};
use dtt_core::{PublishError, PublishResult};
use serde::{Deserialize, Serialize};

use crate::{build_client, read_error_body, transport_error};

/// Response shape of `PUT /api/upload`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub key: String,
    #[serde(rename = "publicUrl")]
    pub public_url: String,
}

/// HTTP client for the site's REST endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> PublishResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a local file into a bucket folder through the site.
    ///
    /// The server writes the file to object storage under
    /// `{folder}/{filename}` and returns the key plus public URL.
    pub async fn upload_file(
        &self,
        file_path: &Path,
        folder: &str,
        filename: &str,
        content_type: &str,
    ) -> PublishResult<UploadResponse> {
        let data = tokio::fs::read(file_path).await?;
        let size = data.len();

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| PublishError::Other(format!("Invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", folder.to_string())
            .text("filename", filename.to_string());

        let url = self.build_url("/api/upload");
        let start = std::time::Instant::now();

        let response = self
            .client
            .put(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(&self.base_url, e))?;

        if !response.status().is_success() {
            return Err(read_error_body(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Other(format!("Failed to parse upload response: {}", e)))?;

        tracing::info!(
            folder = %folder,
            filename = %filename,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload accepted"
        );

        Ok(body)
    }

    /// Insert a story row through the site API.
    pub async fn create_story(&self, record: &StoryRecord) -> PublishResult<PublishedStory> {
        let url = self.build_url("/api/stories");

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| transport_error(&self.base_url, e))?;

        if !response.status().is_success() {
            return Err(read_error_body(response).await);
        }

        let story: PublishedStory = response
            .json()
            .await
            .map_err(|e| PublishError::Other(format!("Failed to parse story response: {}", e)))?;

        tracing::info!(story_id = %story.id, title = %record.title, "Story created");

        Ok(story)
    }

    /// List catalog stories, most played first.
    pub async fn list_stories(&self, query: &StoryQuery) -> PublishResult<Vec<PublishedStory>> {
        let url = self.build_url("/api/stories");

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(genre) = &query.genre {
            params.push(("genre", genre.clone()));
        }
        if query.featured {
            params.push(("featured", "true".to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(&params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&self.base_url, e))?;

        if !response.status().is_success() {
            return Err(read_error_body(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| PublishError::Other(format!("Failed to parse story list: {}", e)))
    }
}
