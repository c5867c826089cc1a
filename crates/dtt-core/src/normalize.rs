//! Metadata normalizer
//!
//! Pure lookups that turn raw authoring metadata into a complete catalog
//! row: genre canonicalization, card gradient colors, the duration label
//! table, and the two pricing derivations. Every lookup is total; unmapped
//! input always resolves through a fallback entry.

use crate::constants::{DEFAULT_GENRE, DESCRIPTION_MAX_CHARS, PUBLISHER_NAME};
use crate::models::{StoryInput, StoryRecord};

/// Gradient used when a genre has no dedicated color.
pub const DEFAULT_COLOR: &str = "from-slate-600 to-slate-800";

/// What to do with a genre the mapping table does not know.
///
/// Both behaviors shipped historically and produce different catalog rows,
/// so the choice stays explicit per invocation instead of being merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreFallback {
    /// Echo the raw genre back title-cased.
    TitleCase,
    /// Replace it with the fixed default genre.
    Drama,
}

/// Which price derivation to apply to a record.
///
/// Credits are always computed (the catalog insert requires them); the
/// price table additionally fills `price_cents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingPolicy {
    CreditLadder,
    PriceTable,
}

/// Whether a failed cover upload aborts the publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverFailurePolicy {
    Fatal,
    Skip,
}

/// The normalization choices for one publish run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishPolicy {
    pub genre_fallback: GenreFallback,
    pub pricing: PricingPolicy,
    pub cover_failure: CoverFailurePolicy,
}

impl PublishPolicy {
    /// Defaults for publishing a single audio file through the site API.
    pub fn api() -> Self {
        PublishPolicy {
            genre_fallback: GenreFallback::TitleCase,
            pricing: PricingPolicy::CreditLadder,
            cover_failure: CoverFailurePolicy::Fatal,
        }
    }

    /// Defaults for publishing an authoring project folder directly to
    /// storage and the database.
    pub fn project() -> Self {
        PublishPolicy {
            genre_fallback: GenreFallback::Drama,
            pricing: PricingPolicy::PriceTable,
            cover_failure: CoverFailurePolicy::Skip,
        }
    }
}

/// Map a raw genre (authoring persona names included) onto a catalog genre.
pub fn normalize_genre(raw: &str, fallback: GenreFallback) -> String {
    let genre = match raw.trim().to_lowercase().as_str() {
        "horror" | "stephen_king" => "Horror",
        "mystery" | "thriller" | "james_patterson" | "agatha_christie" => "Mystery",
        "drama" => "Drama",
        "comedy" => "Comedy",
        "romance" => "Romance",
        "sci-fi" | "scifi" | "science fiction" => "Sci-Fi",
        "trucker" | "trucker stories" => "Trucker Stories",
        "children" => "Children",
        "western" => "Western",
        _ => {
            return match fallback {
                GenreFallback::TitleCase => title_case(raw.trim()),
                GenreFallback::Drama => DEFAULT_GENRE.to_string(),
            }
        }
    };
    genre.to_string()
}

/// Card gradient for a genre. Accepts canonical labels and the historical
/// lowercase aliases; anything else gets the slate default.
pub fn color_for_genre(genre: &str) -> &'static str {
    match genre.trim().to_lowercase().as_str() {
        "horror" => "from-red-600 to-red-900",
        "mystery" | "thriller" | "mystery / thriller" => "from-purple-600 to-purple-900",
        "drama" => "from-orange-600 to-orange-900",
        "comedy" => "from-yellow-600 to-yellow-900",
        "romance" => "from-pink-600 to-pink-900",
        "sci-fi" | "science fiction" => "from-cyan-600 to-cyan-900",
        "trucker stories" | "trucker" => "from-amber-700 to-amber-900",
        "children" => "from-green-600 to-green-900",
        "western" => "from-amber-600 to-amber-900",
        _ => DEFAULT_COLOR,
    }
}

/// Human-readable duration bucket. Upper bounds are inclusive; past two
/// hours the label is whole hours by integer division.
pub fn duration_label(minutes: u32) -> String {
    if minutes <= 15 {
        "15 min".to_string()
    } else if minutes <= 30 {
        "30 min".to_string()
    } else if minutes <= 45 {
        "45 min".to_string()
    } else if minutes <= 60 {
        "1 hr".to_string()
    } else if minutes <= 90 {
        "90 min".to_string()
    } else if minutes <= 120 {
        "2 hr".to_string()
    } else {
        format!("{} hr", minutes / 60)
    }
}

/// Duration label straight from seconds.
pub fn duration_label_from_seconds(seconds: u32) -> String {
    duration_label(seconds / 60)
}

/// Price in cents by duration bucket.
pub fn price_cents(minutes: u32) -> u32 {
    if minutes <= 15 {
        69
    } else if minutes <= 30 {
        129
    } else if minutes <= 60 {
        249
    } else {
        699
    }
}

/// Credit cost: one credit per started quarter hour, minimum one.
pub fn credits(minutes: u32) -> u32 {
    std::cmp::max(1, minutes / 15)
}

/// Keep at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Title-case a string: uppercase the first letter of every alphabetic run,
/// lowercase the rest. Non-alphabetic characters pass through unchanged.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Build the full catalog row from raw input under the given policy.
///
/// Asset URLs are left empty; the pipeline fills them once the uploads
/// have produced public locations.
pub fn story_record(input: &StoryInput, policy: &PublishPolicy) -> StoryRecord {
    let minutes = input.duration_secs / 60;
    let raw_genre = input.genre.as_deref().unwrap_or(DEFAULT_GENRE);
    let genre = normalize_genre(raw_genre, policy.genre_fallback);

    let color = input
        .color_override
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| color_for_genre(&genre).to_string());

    StoryRecord {
        title: input.title.clone(),
        author: input
            .author
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| PUBLISHER_NAME.to_string()),
        genre,
        description: truncate_chars(
            input.description.as_deref().unwrap_or(""),
            DESCRIPTION_MAX_CHARS,
        ),
        duration_mins: minutes,
        duration_label: duration_label_from_seconds(input.duration_secs),
        credits: input.credits_override.unwrap_or_else(|| credits(minutes)),
        price_cents: match policy.pricing {
            PricingPolicy::PriceTable => Some(price_cents(minutes)),
            PricingPolicy::CreditLadder => None,
        },
        color,
        promo_text: input.promo_text.clone(),
        is_new: true,
        is_featured: input.is_featured,
        play_count: 0,
        audio_url: String::new(),
        cover_url: None,
        sample_url: None,
    }
}
