use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DURATION_SECS, DEFAULT_TITLE};
use crate::models::StoryInput;

/// `project.json` as written by the authoring tool.
///
/// Every field is optional; authoring versions differ in what they emit, so
/// parsing stays permissive and the defaults are applied at read time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub metadata: ProjectMetadata,
    #[serde(default)]
    pub revisions: Vec<Revision>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
}

/// One render of the project. Revisions are ordered oldest to newest; only
/// the audio reference matters to the publisher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Revision {
    #[serde(default)]
    pub audio_mp3: Option<String>,
}

impl ProjectManifest {
    /// Display title: metadata title, then project name, then "Untitled".
    /// Empty strings count as absent.
    pub fn title(&self) -> String {
        self.metadata
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| self.project_name.clone().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Map manifest metadata onto normalizer input.
    pub fn story_input(&self) -> StoryInput {
        StoryInput {
            title: self.title(),
            author: self.metadata.author.clone().filter(|a| !a.is_empty()),
            genre: self.metadata.genre.clone().filter(|g| !g.is_empty()),
            description: self.metadata.description.clone(),
            duration_secs: self.metadata.duration_seconds.unwrap_or(DEFAULT_DURATION_SECS),
            ..StoryInput::default()
        }
    }
}
