//! The publish pipeline.
//!
//! Order matters: the audio upload must succeed before anything else is
//! attempted, cover and sample failures are policy-dependent, and a failed
//! catalog insert triggers cleanup of everything uploaded in the run.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use dtt_core::asset::{file_extension, slugify, timestamp_slug, AssetKind};
use dtt_core::models::{PublishedStory, StoryInput};
use dtt_core::normalize::{story_record, CoverFailurePolicy, PublishPolicy};
use dtt_core::{PublishError, PublishResult};

use crate::sample::SampleCutter;
use crate::target::PublishTarget;

/// One publish run: the assets plus the raw story metadata.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub audio_path: PathBuf,
    pub cover_path: Option<PathBuf>,
    /// Pre-cut sample to upload as-is.
    pub sample_path: Option<PathBuf>,
    /// Cut a sample from the audio when no pre-cut one is given.
    pub create_sample: bool,
    pub input: StoryInput,
}

/// What a successful publish produced.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub story: PublishedStory,
    pub audio_url: String,
    pub cover_url: Option<String>,
    pub sample_url: Option<String>,
}

/// Drives a publish run against a target.
pub struct Publisher {
    target: Arc<dyn PublishTarget>,
    policy: PublishPolicy,
    sampler: SampleCutter,
}

impl Publisher {
    pub fn new(target: Arc<dyn PublishTarget>, policy: PublishPolicy, sampler: SampleCutter) -> Self {
        Publisher {
            target,
            policy,
            sampler,
        }
    }

    pub async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishOutcome> {
        if !tokio::fs::try_exists(&request.audio_path)
            .await
            .unwrap_or(false)
        {
            return Err(PublishError::NotFound(format!(
                "Audio file not found: {}",
                request.audio_path.display()
            )));
        }

        let mut record = story_record(&request.input, &self.policy);
        let slug = slugify(&record.title);
        let stamp = timestamp_slug(Utc::now());

        let mut uploaded_keys: Vec<String> = Vec::new();

        // Audio first; without it there is no story to insert.
        let audio_name =
            AssetKind::Audio.object_name(&slug, &stamp, &file_extension(&request.audio_path));
        let audio = self
            .target
            .upload(&request.audio_path, AssetKind::Audio, &audio_name)
            .await?;
        uploaded_keys.push(audio.key.clone());
        record.audio_url = audio.url;

        let mut cover_url = None;
        if let Some(cover_path) = &request.cover_path {
            let cover_name =
                AssetKind::Cover.object_name(&slug, &stamp, &file_extension(cover_path));
            match self
                .target
                .upload(cover_path, AssetKind::Cover, &cover_name)
                .await
            {
                Ok(asset) => {
                    uploaded_keys.push(asset.key.clone());
                    cover_url = Some(asset.url);
                }
                Err(e) => match self.policy.cover_failure {
                    CoverFailurePolicy::Fatal => {
                        self.target.cleanup(&uploaded_keys).await;
                        return Err(e);
                    }
                    CoverFailurePolicy::Skip => {
                        tracing::warn!(error = %e, "Cover upload failed, continuing without cover");
                    }
                },
            }
        }
        record.cover_url = cover_url.clone();

        // Samples never fail a publish.
        let mut sample_url = None;
        if let Some(sample_input) = self.resolve_sample(request).await {
            let sample_name =
                AssetKind::Sample.object_name(&slug, &stamp, &file_extension(&sample_input));
            match self
                .target
                .upload(&sample_input, AssetKind::Sample, &sample_name)
                .await
            {
                Ok(asset) => {
                    uploaded_keys.push(asset.key.clone());
                    sample_url = Some(asset.url);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Sample upload failed, continuing without sample");
                }
            }
        }
        record.sample_url = sample_url.clone();

        let story = match self.target.insert_record(&record).await {
            Ok(story) => story,
            Err(e) => {
                self.target.cleanup(&uploaded_keys).await;
                return Err(e);
            }
        };

        tracing::info!(story_id = %story.id, title = %record.title, "Story published");

        Ok(PublishOutcome {
            story,
            audio_url: record.audio_url,
            cover_url,
            sample_url,
        })
    }

    /// An explicit sample path wins; a missing one is skipped with a
    /// warning rather than failing the run. Otherwise cut one on demand.
    async fn resolve_sample(&self, request: &PublishRequest) -> Option<PathBuf> {
        if let Some(path) = &request.sample_path {
            if tokio::fs::try_exists(path).await.unwrap_or(false) {
                return Some(path.clone());
            }
            tracing::warn!(path = %path.display(), "Sample file not found, skipping");
            return None;
        }

        if request.create_sample {
            let output = SampleCutter::default_output_path(&request.audio_path);
            match self.sampler.cut(&request.audio_path, &output).await {
                Ok(()) => return Some(output),
                Err(e) => {
                    tracing::warn!(error = %e, "Sample cut failed, continuing without sample");
                    return None;
                }
            }
        }

        None
    }
}

impl PublishRequest {
    /// Request with just an audio file and metadata, no cover or sample.
    pub fn audio_only(audio_path: PathBuf, input: StoryInput) -> Self {
        PublishRequest {
            audio_path,
            cover_path: None,
            sample_path: None,
            create_sample: false,
            input,
        }
    }
}
