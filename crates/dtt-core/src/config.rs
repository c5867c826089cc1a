//! Environment-driven configuration
//!
//! All credentials and endpoints come from the environment (a `.env` file
//! is honored). Nothing here carries defaults for secrets; publishing
//! directly to storage fails validation until the relevant variables are
//! set.

use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SAMPLE_SECONDS};
use crate::storage_types::StorageBackend;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Which route a publish takes to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishTargetKind {
    /// Through the site's REST endpoints.
    Api,
    /// Straight to object storage plus the catalog database.
    Direct,
}

impl FromStr for PublishTargetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "api" => Ok(PublishTargetKind::Api),
            "direct" => Ok(PublishTargetKind::Direct),
            _ => Err(anyhow::anyhow!("Invalid publish target: {}", s)),
        }
    }
}

impl std::fmt::Display for PublishTargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishTargetKind::Api => write!(f, "api"),
            PublishTargetKind::Direct => write!(f, "direct"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub http_timeout_secs: u64,
    pub sample_seconds: u32,
    pub ffmpeg_path: String,

    pub storage_backend: Option<StorageBackend>,

    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,

    pub r2_account_id: Option<String>,
    pub r2_endpoint: Option<String>,
    pub r2_access_key_id: Option<String>,
    pub r2_secret_access_key: Option<String>,
    pub r2_bucket: Option<String>,
    pub r2_public_url: Option<String>,

    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Config {
            api_url: env::var("DTT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            http_timeout_secs: env::var("DTT_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            sample_seconds: env::var("DTT_SAMPLE_SECONDS")
                .unwrap_or_else(|_| DEFAULT_SAMPLE_SECONDS.to_string())
                .parse()
                .unwrap_or(DEFAULT_SAMPLE_SECONDS),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| DEFAULT_FFMPEG_PATH.to_string()),
            storage_backend: env::var("DTT_STORAGE_BACKEND")
                .ok()
                .and_then(|s| s.parse().ok()),
            supabase_url: env::var("SUPABASE_URL").ok(),
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY").ok(),
            r2_account_id: env::var("R2_ACCOUNT_ID").ok(),
            r2_endpoint: env::var("R2_ENDPOINT").ok(),
            r2_access_key_id: env::var("R2_ACCESS_KEY_ID").ok(),
            r2_secret_access_key: env::var("R2_SECRET_ACCESS_KEY").ok(),
            r2_bucket: env::var("R2_BUCKET")
                .or_else(|_| env::var("R2_BUCKET_NAME"))
                .ok(),
            r2_public_url: env::var("R2_PUBLIC_URL").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    /// S3 endpoint to use for direct uploads. An explicit `R2_ENDPOINT`
    /// wins; otherwise it is derived from the account id.
    pub fn r2_endpoint(&self) -> Option<String> {
        if let Some(endpoint) = &self.r2_endpoint {
            return Some(endpoint.clone());
        }
        self.r2_account_id
            .as_ref()
            .map(|account| format!("https://{}.r2.cloudflarestorage.com", account))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.api_url.starts_with("http") {
            return Err(anyhow::anyhow!(
                "DTT_API_URL must be an http(s) URL, got '{}'",
                self.api_url
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "DTT_HTTP_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }

    /// Extra validation for direct publishing, which needs storage and
    /// database credentials the API route does not.
    pub fn validate_direct(&self) -> Result<(), anyhow::Error> {
        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.r2_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "R2_BUCKET must be set when using the S3 storage backend"
                    ));
                }
                if self.r2_endpoint().is_none() {
                    return Err(anyhow::anyhow!(
                        "R2_ENDPOINT or R2_ACCOUNT_ID must be set when using the S3 storage backend"
                    ));
                }
                if self.r2_access_key_id.is_none() || self.r2_secret_access_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "R2_ACCESS_KEY_ID and R2_SECRET_ACCESS_KEY must be set when using the S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        if self.supabase_url.is_none() {
            return Err(anyhow::anyhow!(
                "SUPABASE_URL must be set for direct publishing"
            ));
        }
        if self.supabase_service_key.is_none() {
            return Err(anyhow::anyhow!(
                "SUPABASE_SERVICE_KEY must be set for direct publishing"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            api_url: "http://localhost:3000".to_string(),
            http_timeout_secs: 300,
            sample_seconds: 120,
            ffmpeg_path: "ffmpeg".to_string(),
            storage_backend: None,
            supabase_url: None,
            supabase_service_key: None,
            r2_account_id: None,
            r2_endpoint: None,
            r2_access_key_id: None,
            r2_secret_access_key: None,
            r2_bucket: None,
            r2_public_url: None,
            local_storage_path: None,
            local_storage_base_url: None,
        }
    }

    #[test]
    fn validate_rejects_non_http_api_url() {
        let config = Config {
            api_url: "localhost:3000".to_string(),
            ..base_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("DTT_API_URL"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_secs: 0,
            ..base_config()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("DTT_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn direct_defaults_to_s3_and_requires_bucket() {
        let config = base_config();
        let err = config.validate_direct().unwrap_err();
        assert!(err.to_string().contains("R2_BUCKET"));
    }

    #[test]
    fn direct_s3_requires_endpoint_or_account() {
        let config = Config {
            r2_bucket: Some("stories".to_string()),
            ..base_config()
        };
        let err = config.validate_direct().unwrap_err();
        assert!(err.to_string().contains("R2_ENDPOINT"));
        assert!(err.to_string().contains("R2_ACCOUNT_ID"));
    }

    #[test]
    fn direct_s3_requires_keys_and_database() {
        let partial = Config {
            r2_bucket: Some("stories".to_string()),
            r2_account_id: Some("abc123".to_string()),
            ..base_config()
        };
        let err = partial.validate_direct().unwrap_err();
        assert!(err.to_string().contains("R2_ACCESS_KEY_ID"));

        let with_keys = Config {
            r2_access_key_id: Some("key".to_string()),
            r2_secret_access_key: Some("secret".to_string()),
            ..partial
        };
        let err = with_keys.validate_direct().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));

        let complete = Config {
            supabase_url: Some("https://example.supabase.co".to_string()),
            supabase_service_key: Some("service-key".to_string()),
            ..with_keys
        };
        assert!(complete.validate_direct().is_ok());
    }

    #[test]
    fn direct_local_requires_path_and_base_url() {
        let config = Config {
            storage_backend: Some(StorageBackend::Local),
            ..base_config()
        };
        let err = config.validate_direct().unwrap_err();
        assert!(err.to_string().contains("LOCAL_STORAGE_PATH"));

        let complete = Config {
            storage_backend: Some(StorageBackend::Local),
            local_storage_path: Some("/tmp/dtt".to_string()),
            local_storage_base_url: Some("http://localhost:3000/media".to_string()),
            supabase_url: Some("https://example.supabase.co".to_string()),
            supabase_service_key: Some("service-key".to_string()),
            ..base_config()
        };
        assert!(complete.validate_direct().is_ok());
    }

    #[test]
    fn endpoint_derived_from_account_id() {
        let config = Config {
            r2_account_id: Some("abc123".to_string()),
            ..base_config()
        };
        assert_eq!(
            config.r2_endpoint().as_deref(),
            Some("https://abc123.r2.cloudflarestorage.com")
        );

        let explicit = Config {
            r2_endpoint: Some("http://127.0.0.1:9000".to_string()),
            ..config
        };
        assert_eq!(
            explicit.r2_endpoint().as_deref(),
            Some("http://127.0.0.1:9000")
        );
    }

    #[test]
    fn target_kind_parses() {
        assert_eq!(
            "api".parse::<PublishTargetKind>().unwrap(),
            PublishTargetKind::Api
        );
        assert_eq!(
            "Direct".parse::<PublishTargetKind>().unwrap(),
            PublishTargetKind::Direct
        );
        assert!("ftp".parse::<PublishTargetKind>().is_err());
    }
}
