//! End-to-end pipeline tests against an in-memory target.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dtt_core::asset::AssetKind;
use dtt_core::models::{PublishedStory, StoryInput, StoryRecord};
use dtt_core::normalize::PublishPolicy;
use dtt_core::{PublishError, PublishResult};
use dtt_publish::{load_project, PublishRequest, PublishTarget, Publisher, SampleCutter, UploadedAsset};
use tempfile::tempdir;

/// Records every call; failures are switchable per test.
#[derive(Default)]
struct FakeTarget {
    uploads: Mutex<Vec<String>>,
    inserted: Mutex<Option<StoryRecord>>,
    cleaned: Mutex<Vec<String>>,
    fail_cover: bool,
    fail_insert: bool,
}

#[async_trait]
impl PublishTarget for FakeTarget {
    async fn upload(
        &self,
        _file: &Path,
        kind: AssetKind,
        filename: &str,
    ) -> PublishResult<UploadedAsset> {
        if self.fail_cover && matches!(kind, AssetKind::Cover) {
            return Err(PublishError::Other("cover upload refused".to_string()));
        }

        let key = format!("{}/{}", kind.folder(), filename);
        self.uploads.lock().unwrap().push(key.clone());

        Ok(UploadedAsset {
            url: format!("https://media.test/{}", key),
            key,
        })
    }

    async fn insert_record(&self, record: &StoryRecord) -> PublishResult<PublishedStory> {
        if self.fail_insert {
            return Err(PublishError::Rejected {
                status: 500,
                body: "insert refused".to_string(),
            });
        }

        *self.inserted.lock().unwrap() = Some(record.clone());
        Ok(serde_json::from_value(
            serde_json::json!({"id": "7a4f3c8e-2b1d-4e5f-9a6b-8c7d6e5f4a3b"}),
        )
        .unwrap())
    }

    async fn cleanup(&self, keys: &[String]) {
        self.cleaned.lock().unwrap().extend_from_slice(keys);
    }
}

fn publisher(target: Arc<FakeTarget>, policy: PublishPolicy) -> Publisher {
    Publisher::new(target, policy, SampleCutter::new("true".to_string(), 120))
}

fn write_project_folder(dir: &Path) {
    std::fs::create_dir(dir.join("renders")).unwrap();
    std::fs::write(dir.join("renders/v1.mp3"), b"old audio").unwrap();
    std::fs::write(dir.join("renders/v2.mp3"), b"new audio").unwrap();
    std::fs::write(dir.join("cover.png"), b"png bytes").unwrap();
    std::fs::write(
        dir.join("project.json"),
        r#"{
            "project_name": "haul_01",
            "metadata": {
                "title": "The Last Haul",
                "author": "J. Diesel",
                "genre": "trucker",
                "description": "A long night on I-80.",
                "duration_seconds": 2700
            },
            "revisions": [
                {"audio_mp3": "renders/v1.mp3"},
                {"audio_mp3": "renders/v2.mp3"}
            ]
        }"#,
    )
    .unwrap();
}

#[tokio::test]
async fn publishes_project_folder_end_to_end() {
    let dir = tempdir().unwrap();
    write_project_folder(dir.path());

    let bundle = load_project(dir.path()).await.unwrap();
    assert_eq!(bundle.audio_path, dir.path().join("renders/v2.mp3"));

    let request = PublishRequest {
        audio_path: bundle.audio_path.clone(),
        cover_path: bundle.cover_path.clone(),
        sample_path: None,
        create_sample: false,
        input: bundle.manifest.story_input(),
    };

    let target = Arc::new(FakeTarget::default());
    let outcome = publisher(target.clone(), PublishPolicy::project())
        .publish(&request)
        .await
        .unwrap();

    let record = target.inserted.lock().unwrap().clone().unwrap();
    assert_eq!(record.title, "The Last Haul");
    assert_eq!(record.author, "J. Diesel");
    assert_eq!(record.genre, "Trucker Stories");
    assert_eq!(record.duration_mins, 45);
    assert_eq!(record.duration_label, "45 min");
    assert_eq!(record.credits, 3);
    assert_eq!(record.price_cents, Some(249));
    assert_eq!(record.color, "from-amber-700 to-amber-900");
    assert!(record.audio_url.starts_with("https://media.test/stories/the-last-haul-"));
    assert!(record.audio_url.ends_with(".mp3"));
    assert!(record
        .cover_url
        .as_deref()
        .unwrap()
        .starts_with("https://media.test/covers/the-last-haul-"));
    assert_eq!(record.sample_url, None);

    let uploads = target.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 2);
    assert!(uploads[0].starts_with("stories/"));
    assert!(uploads[1].starts_with("covers/"));

    assert_eq!(
        outcome.story.id.to_string(),
        "7a4f3c8e-2b1d-4e5f-9a6b-8c7d6e5f4a3b"
    );
    assert!(target.cleaned.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_audio_fails_before_any_upload() {
    let target = Arc::new(FakeTarget::default());
    let request = PublishRequest::audio_only(
        PathBuf::from("/nonexistent/story.mp3"),
        StoryInput {
            title: "Ghost".to_string(),
            duration_secs: 600,
            ..StoryInput::default()
        },
    );

    let err = publisher(target.clone(), PublishPolicy::api())
        .publish(&request)
        .await
        .unwrap_err();

    match err {
        PublishError::NotFound(msg) => assert!(msg.contains("Audio file not found")),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(target.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cover_failure_is_skipped_under_project_policy() {
    let dir = tempdir().unwrap();
    write_project_folder(dir.path());
    let bundle = load_project(dir.path()).await.unwrap();

    let request = PublishRequest {
        audio_path: bundle.audio_path,
        cover_path: bundle.cover_path,
        sample_path: None,
        create_sample: false,
        input: bundle.manifest.story_input(),
    };

    let target = Arc::new(FakeTarget {
        fail_cover: true,
        ..FakeTarget::default()
    });
    let outcome = publisher(target.clone(), PublishPolicy::project())
        .publish(&request)
        .await
        .unwrap();

    assert_eq!(outcome.cover_url, None);
    let record = target.inserted.lock().unwrap().clone().unwrap();
    assert_eq!(record.cover_url, None);
    assert!(!record.audio_url.is_empty());
    assert!(target.cleaned.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cover_failure_is_fatal_under_api_policy() {
    let dir = tempdir().unwrap();
    write_project_folder(dir.path());
    let bundle = load_project(dir.path()).await.unwrap();

    let request = PublishRequest {
        audio_path: bundle.audio_path,
        cover_path: bundle.cover_path,
        sample_path: None,
        create_sample: false,
        input: bundle.manifest.story_input(),
    };

    let target = Arc::new(FakeTarget {
        fail_cover: true,
        ..FakeTarget::default()
    });
    let err = publisher(target.clone(), PublishPolicy::api())
        .publish(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Other(_)));
    assert!(target.inserted.lock().unwrap().is_none());

    // The already-uploaded audio is removed.
    let cleaned = target.cleaned.lock().unwrap();
    assert_eq!(cleaned.len(), 1);
    assert!(cleaned[0].starts_with("stories/"));
}

#[tokio::test]
async fn failed_insert_cleans_up_every_upload() {
    let dir = tempdir().unwrap();
    write_project_folder(dir.path());
    let bundle = load_project(dir.path()).await.unwrap();

    let request = PublishRequest {
        audio_path: bundle.audio_path,
        cover_path: bundle.cover_path,
        sample_path: None,
        create_sample: false,
        input: bundle.manifest.story_input(),
    };

    let target = Arc::new(FakeTarget {
        fail_insert: true,
        ..FakeTarget::default()
    });
    let err = publisher(target.clone(), PublishPolicy::project())
        .publish(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Rejected { status: 500, .. }));

    let cleaned = target.cleaned.lock().unwrap();
    assert_eq!(cleaned.len(), 2);
    assert!(cleaned.iter().any(|k| k.starts_with("stories/")));
    assert!(cleaned.iter().any(|k| k.starts_with("covers/")));
}

#[tokio::test]
async fn supplied_sample_is_uploaded_to_samples_folder() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("story.mp3");
    let sample = dir.path().join("story-preview.mp3");
    std::fs::write(&audio, b"full audio").unwrap();
    std::fs::write(&sample, b"preview").unwrap();

    let request = PublishRequest {
        audio_path: audio,
        cover_path: None,
        sample_path: Some(sample),
        create_sample: false,
        input: StoryInput {
            title: "Night Shift".to_string(),
            genre: Some("mystery".to_string()),
            duration_secs: 3600,
            ..StoryInput::default()
        },
    };

    let target = Arc::new(FakeTarget::default());
    let outcome = publisher(target.clone(), PublishPolicy::api())
        .publish(&request)
        .await
        .unwrap();

    let sample_url = outcome.sample_url.unwrap();
    assert!(sample_url.contains("/samples/night-shift-sample-"));

    let record = target.inserted.lock().unwrap().clone().unwrap();
    assert_eq!(record.sample_url.as_deref(), Some(sample_url.as_str()));
}

#[tokio::test]
async fn missing_supplied_sample_is_skipped() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("story.mp3");
    std::fs::write(&audio, b"full audio").unwrap();

    let request = PublishRequest {
        audio_path: audio,
        cover_path: None,
        sample_path: Some(dir.path().join("never-made.mp3")),
        create_sample: false,
        input: StoryInput {
            title: "Night Shift".to_string(),
            duration_secs: 3600,
            ..StoryInput::default()
        },
    };

    let target = Arc::new(FakeTarget::default());
    let outcome = publisher(target.clone(), PublishPolicy::api())
        .publish(&request)
        .await
        .unwrap();

    assert_eq!(outcome.sample_url, None);
    assert_eq!(target.uploads.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_sample_cut_does_not_fail_the_publish() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("story.mp3");
    std::fs::write(&audio, b"full audio").unwrap();

    let request = PublishRequest {
        audio_path: audio,
        cover_path: None,
        sample_path: None,
        create_sample: true,
        input: StoryInput {
            title: "Night Shift".to_string(),
            duration_secs: 3600,
            ..StoryInput::default()
        },
    };

    let target = Arc::new(FakeTarget::default());
    // A cutter pointing at a missing binary cannot produce a sample.
    let publisher = Publisher::new(
        target.clone(),
        PublishPolicy::api(),
        SampleCutter::new("definitely-not-ffmpeg-binary".to_string(), 120),
    );
    let outcome = publisher.publish(&request).await.unwrap();

    assert_eq!(outcome.sample_url, None);
    assert!(target.inserted.lock().unwrap().is_some());
}

#[tokio::test]
async fn api_policy_builds_credit_priced_record() {
    let dir = tempdir().unwrap();
    let audio = dir.path().join("story.mp3");
    std::fs::write(&audio, b"full audio").unwrap();

    let request = PublishRequest::audio_only(
        audio,
        StoryInput {
            title: "Open Road".to_string(),
            genre: Some("cowboy noir".to_string()),
            duration_secs: 4500,
            ..StoryInput::default()
        },
    );

    let target = Arc::new(FakeTarget::default());
    publisher(target.clone(), PublishPolicy::api())
        .publish(&request)
        .await
        .unwrap();

    let record = target.inserted.lock().unwrap().clone().unwrap();
    // Unknown genres are title-cased rather than replaced.
    assert_eq!(record.genre, "Cowboy Noir");
    assert_eq!(record.duration_mins, 75);
    assert_eq!(record.duration_label, "90 min");
    assert_eq!(record.credits, 5);
    assert_eq!(record.price_cents, None);
    assert_eq!(record.color, "from-slate-600 to-slate-800");
}
