//! Fixed values shared across the publisher.

/// Catalog-facing publisher name, used when a story has no author.
pub const PUBLISHER_NAME: &str = "Drive Time Tales";

/// Genre used when a project manifest carries none.
pub const DEFAULT_GENRE: &str = "Drama";

/// Title used when neither the manifest metadata nor the project name has one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Assumed story length when the manifest omits it (30 minutes).
pub const DEFAULT_DURATION_SECS: u32 = 1800;

/// Catalog descriptions are capped at this many characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Length of the auto-generated preview clip.
pub const DEFAULT_SAMPLE_SECONDS: u32 = 120;

/// Network timeout generous enough for full-length audio uploads.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// Manifest filename inside an authoring project folder.
pub const MANIFEST_FILENAME: &str = "project.json";

/// Cover art filenames probed inside a project folder, in priority order.
pub const COVER_CANDIDATES: [&str; 5] = [
    "cover.png",
    "cover.jpg",
    "cover.jpeg",
    "Cover.png",
    "Cover.jpg",
];
