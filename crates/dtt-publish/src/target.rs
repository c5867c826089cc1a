//! Publish targets.
//!
//! A target is where uploads and the catalog insert go. Two are supported:
//! through the site's REST API, or directly to object storage plus the
//! catalog database. The pipeline drives either through the same trait.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use dtt_client::api::ApiClient;
use dtt_client::postgrest::CatalogDbClient;
use dtt_core::asset::{content_type_for_path, AssetKind};
use dtt_core::models::{PublishedStory, StoryRecord};
use dtt_core::PublishResult;
use dtt_storage::Storage;

/// A stored asset: its storage key and the public URL it is served from.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub key: String,
    pub url: String,
}

/// Destination of a publish run.
#[async_trait]
pub trait PublishTarget: Send + Sync {
    /// Upload one file into the folder for its asset kind.
    async fn upload(
        &self,
        file: &Path,
        kind: AssetKind,
        filename: &str,
    ) -> PublishResult<UploadedAsset>;

    /// Insert the finished story row.
    async fn insert_record(&self, record: &StoryRecord) -> PublishResult<PublishedStory>;

    /// Remove uploaded objects after a failed run. Best effort; targets
    /// that cannot delete log the orphans instead.
    async fn cleanup(&self, keys: &[String]) {
        let _ = keys;
    }
}

/// Publishes through the running site's REST endpoints.
pub struct ApiTarget {
    client: ApiClient,
}

impl ApiTarget {
    pub fn new(client: ApiClient) -> Self {
        ApiTarget { client }
    }
}

#[async_trait]
impl PublishTarget for ApiTarget {
    async fn upload(
        &self,
        file: &Path,
        kind: AssetKind,
        filename: &str,
    ) -> PublishResult<UploadedAsset> {
        let content_type = content_type_for_path(file);
        let response = self
            .client
            .upload_file(file, kind.folder(), filename, content_type)
            .await?;

        Ok(UploadedAsset {
            key: response.key,
            url: response.public_url,
        })
    }

    async fn insert_record(&self, record: &StoryRecord) -> PublishResult<PublishedStory> {
        self.client.create_story(record).await
    }

    // The site exposes no delete endpoint, so failed runs leave orphans
    // for the operator to clean up.
    async fn cleanup(&self, keys: &[String]) {
        if !keys.is_empty() {
            tracing::warn!(
                keys = ?keys,
                "Publish failed after upload; orphaned objects remain in storage"
            );
        }
    }
}

/// Publishes straight to object storage and the catalog database.
pub struct DirectTarget {
    storage: Arc<dyn Storage>,
    db: CatalogDbClient,
}

impl DirectTarget {
    pub fn new(storage: Arc<dyn Storage>, db: CatalogDbClient) -> Self {
        DirectTarget { storage, db }
    }
}

#[async_trait]
impl PublishTarget for DirectTarget {
    async fn upload(
        &self,
        file: &Path,
        kind: AssetKind,
        filename: &str,
    ) -> PublishResult<UploadedAsset> {
        let key = format!("{}/{}", kind.folder(), filename);
        let content_type = content_type_for_path(file);

        let data = tokio::fs::read(file).await?;
        let url = self.storage.put(&key, data, content_type).await?;

        Ok(UploadedAsset { key, url })
    }

    async fn insert_record(&self, record: &StoryRecord) -> PublishResult<PublishedStory> {
        self.db.insert_story(record).await
    }

    async fn cleanup(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!(error = %e, key = %key, "Failed to delete uploaded object");
            }
        }
    }
}
