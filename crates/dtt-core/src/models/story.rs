use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog row ready to submit to the stories table.
///
/// Built once per publish run by the normalizer; the pipeline fills the
/// asset URLs after the uploads succeed. Optional fields are omitted from
/// the serialized payload so the remote insert applies its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub duration_mins: u32,
    pub duration_label: String,
    pub credits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<u32>,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_text: Option<String>,
    pub is_new: bool,
    pub is_featured: bool,
    pub play_count: u32,
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_url: Option<String>,
}

/// A story row as returned by the catalog after an insert or a listing.
///
/// The two transports return slightly different shapes (the site API echoes
/// an object, the database REST endpoint a one-element array), so everything
/// beyond the generated id is optional and unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedStory {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_mins: Option<u32>,
    #[serde(default)]
    pub duration_label: Option<String>,
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default)]
    pub price_cents: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub promo_text: Option<String>,
    #[serde(default)]
    pub is_new: Option<bool>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub play_count: Option<u32>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub sample_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for listing catalog rows.
#[derive(Debug, Clone, Default)]
pub struct StoryQuery {
    pub genre: Option<String>,
    pub featured: bool,
    pub limit: Option<u32>,
}

/// Raw story metadata as supplied by a caller, before normalization.
///
/// Optional fields fall back to the catalog defaults; the overrides skip
/// the corresponding derivation entirely.
#[derive(Debug, Clone, Default)]
pub struct StoryInput {
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub duration_secs: u32,
    pub promo_text: Option<String>,
    pub is_featured: bool,
    pub credits_override: Option<u32>,
    pub color_override: Option<String>,
}
