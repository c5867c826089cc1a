use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

/// S3-compatible storage implementation
///
/// Built for custom-endpoint providers (Cloudflare R2, MinIO, DigitalOcean
/// Spaces); credentials are passed in explicitly rather than resolved from
/// the ambient AWS chain.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    endpoint_url: String,
    public_base_url: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - Bucket name
    /// * `endpoint_url` - Endpoint of the S3-compatible provider
    ///   (e.g., "https://{account}.r2.cloudflarestorage.com")
    /// * `access_key_id` / `secret_access_key` - Static credentials
    /// * `public_base_url` - Optional CDN/public base the bucket is served
    ///   from; falls back to path-style endpoint URLs when absent
    pub fn new(
        bucket: String,
        endpoint_url: String,
        access_key_id: String,
        secret_access_key: String,
        public_base_url: Option<String>,
    ) -> Self {
        let credentials = Credentials::new(access_key_id, secret_access_key, None, None, "static");

        // R2 uses the "auto" region; path-style addressing is required for
        // most S3-compatible providers. Retries are off: a publish makes one
        // attempt per call and a failure aborts the whole run.
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&endpoint_url)
            .region(Region::new("auto"))
            .retry_config(RetryConfig::disabled())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        S3Storage {
            client: Client::from_conf(s3_config),
            bucket,
            endpoint_url,
            public_base_url,
        }
    }

    /// Generate public URL for an object
    ///
    /// Uses the public base URL when one is configured, otherwise the
    /// path-style form: {endpoint}/{bucket}/{key}
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref base) = self.public_base_url {
            format!("{}/{}", base.trim_end_matches('/'), key)
        } else {
            format!(
                "{}/{}/{}",
                self.endpoint_url.trim_end_matches('/'),
                self.bucket,
                key
            )
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String> {
        let size = data.len() as u64;
        let body = ByteStream::from(Bytes::from(data));
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        let url = self.generate_url(key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                StorageError::DeleteFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    HeadObjectError::NotFound(_) => Ok(false),
                    _ => Err(StorageError::BackendError(e.to_string())),
                },
                _ => Err(StorageError::BackendError(e.to_string())),
            },
        }
    }

    fn public_url(&self, key: &str) -> String {
        self.generate_url(key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
