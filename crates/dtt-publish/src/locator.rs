//! Project folder discovery.
//!
//! An authoring project is a directory with a `project.json` manifest,
//! rendered audio referenced by its revisions, and optionally a cover
//! image at a well-known filename.

use std::path::{Path, PathBuf};

use dtt_core::constants::{COVER_CANDIDATES, MANIFEST_FILENAME};
use dtt_core::models::ProjectManifest;
use dtt_core::{PublishError, PublishResult};

/// Everything publishable found in a project folder.
#[derive(Debug, Clone)]
pub struct ProjectBundle {
    pub root: PathBuf,
    pub manifest: ProjectManifest,
    pub audio_path: PathBuf,
    pub cover_path: Option<PathBuf>,
}

/// Read a project folder into a bundle.
///
/// Fails when the manifest is missing or unparseable, or when no revision
/// references an audio file that exists on disk.
pub async fn load_project(dir: &Path) -> PublishResult<ProjectBundle> {
    let manifest_path = dir.join(MANIFEST_FILENAME);
    if !tokio::fs::try_exists(&manifest_path).await.unwrap_or(false) {
        return Err(PublishError::NotFound(format!(
            "No {} found in {}",
            MANIFEST_FILENAME,
            dir.display()
        )));
    }

    let raw = tokio::fs::read_to_string(&manifest_path).await?;
    let manifest: ProjectManifest = serde_json::from_str(&raw).map_err(|e| {
        PublishError::InvalidManifest(format!("{}: {}", manifest_path.display(), e))
    })?;

    let audio_path = find_audio(dir, &manifest).await?;
    let cover_path = find_cover(dir).await;

    tracing::debug!(
        project = %dir.display(),
        audio = %audio_path.display(),
        has_cover = cover_path.is_some(),
        "Project loaded"
    );

    Ok(ProjectBundle {
        root: dir.to_path_buf(),
        manifest,
        audio_path,
        cover_path,
    })
}

/// Newest revision first; a revision only counts if its audio reference is
/// non-empty and the file is actually on disk.
async fn find_audio(dir: &Path, manifest: &ProjectManifest) -> PublishResult<PathBuf> {
    for revision in manifest.revisions.iter().rev() {
        let rel = match revision.audio_mp3.as_deref() {
            Some(rel) if !rel.is_empty() => rel,
            _ => continue,
        };
        let candidate = dir.join(rel);
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return Ok(candidate);
        }
    }

    Err(PublishError::NotFound(
        "No audio file found in project".to_string(),
    ))
}

async fn find_cover(dir: &Path) -> Option<PathBuf> {
    for name in COVER_CANDIDATES {
        let candidate = dir.join(name);
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return Some(candidate);
        }
    }
    None
}
