//! Asset naming
//!
//! Deterministic object keys for the three asset kinds, plus the slug and
//! timestamp helpers they are built from.

use std::path::Path;

use chrono::{DateTime, Utc};

/// The three kinds of files a story publish can upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Audio,
    Cover,
    Sample,
}

impl AssetKind {
    /// Bucket folder this kind of asset lives under.
    pub fn folder(&self) -> &'static str {
        match self {
            AssetKind::Audio => "stories",
            AssetKind::Cover => "covers",
            AssetKind::Sample => "samples",
        }
    }

    /// Object name within the folder. Samples carry a marker so they can
    /// never collide with the full audio of the same publish.
    pub fn object_name(&self, slug: &str, stamp: &str, ext: &str) -> String {
        match self {
            AssetKind::Audio | AssetKind::Cover => format!("{}-{}{}", slug, stamp, ext),
            AssetKind::Sample => format!("{}-sample-{}{}", slug, stamp, ext),
        }
    }

    /// Full object key, folder included.
    pub fn object_key(&self, slug: &str, stamp: &str, ext: &str) -> String {
        format!("{}/{}", self.folder(), self.object_name(slug, stamp, ext))
    }
}

/// Reduce a title to a URL-safe slug.
///
/// Alphanumerics are kept lowercased, spaces and hyphens become single
/// hyphens, everything else is dropped. The result never starts or ends
/// with a hyphen.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_sep = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.extend(c.to_lowercase());
        } else if c == ' ' || c == '-' {
            pending_sep = true;
        }
    }
    out
}

/// Timestamp component of an object name, second resolution.
pub fn timestamp_slug(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// MIME type by file extension, `application/octet-stream` when unknown.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Lowercased extension with leading dot, empty when the path has none.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}
