//! Direct Supabase PostgREST client for the stories table.
//!
//! Used by the direct publish target, which bypasses the site and talks
//! to the catalog database itself. Requires the service role key.

use std::time::Duration;

use dtt_core::models::{PublishedStory, StoryQuery, StoryRecord};
use dtt_core::{PublishError, PublishResult};

use crate::{build_client, read_error_body, transport_error};

/// Client for the catalog database's REST interface.
#[derive(Clone, Debug)]
pub struct CatalogDbClient {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl CatalogDbClient {
    pub fn new(base_url: String, service_key: String, timeout: Duration) -> PublishResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        })
    }

    fn auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    /// Insert one story row and return it as stored.
    ///
    /// PostgREST answers an insert with an array of the created rows when
    /// asked for representation; a single insert yields a one-element array.
    pub async fn insert_story(&self, record: &StoryRecord) -> PublishResult<PublishedStory> {
        let url = format!("{}/rest/v1/stories", self.base_url);

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(record);

        let response = self
            .auth(request)
            .send()
            .await
            .map_err(|e| transport_error(&self.base_url, e))?;

        if !response.status().is_success() {
            return Err(read_error_body(response).await);
        }

        let mut rows: Vec<PublishedStory> = response
            .json()
            .await
            .map_err(|e| PublishError::Other(format!("Failed to parse insert response: {}", e)))?;

        if rows.is_empty() {
            return Err(PublishError::Other(
                "Insert succeeded but returned no rows".to_string(),
            ));
        }

        let story = rows.remove(0);
        tracing::info!(story_id = %story.id, title = %record.title, "Story row inserted");

        Ok(story)
    }

    /// List catalog stories, most played first.
    pub async fn list_stories(&self, query: &StoryQuery) -> PublishResult<Vec<PublishedStory>> {
        let url = format!("{}/rest/v1/stories", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("select", "*".to_string()),
            ("order", "play_count.desc".to_string()),
        ];
        if let Some(genre) = &query.genre {
            params.push(("genre", format!("eq.{}", genre)));
        }
        if query.featured {
            params.push(("is_featured", "eq.true".to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        let request = self.client.get(&url).query(&params);

        let response = self
            .auth(request)
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
