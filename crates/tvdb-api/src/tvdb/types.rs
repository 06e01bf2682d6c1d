//! The TVDB API response envelopes and records.
//!
//! Every field is optional on the wire: both a missing key and an explicit
//! `null` decode to the field's default value.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` as the type's default value.
fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value: Option<T> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

// --- Login ---

/// Request body for `POST /login`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    /// API key.
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
    /// User key.
    #[serde(rename = "userKey")]
    pub user_key: &'a str,
    /// Username.
    pub username: &'a str,
}

/// Response from `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
    /// JWT bearer token.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub token: String,
    /// Error message (empty on success).
    #[serde(
        rename = "Error",
        default,
        deserialize_with = "deserialize_null_as_default"
    )]
    pub error: String,
}

// --- Errors ---

/// Soft errors reported by the API next to a response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryErrors {
    /// Invalid filters passed to the route.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub invalid_filters: Vec<String>,
    /// Invalid language or missing translation.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub invalid_language: String,
    /// Invalid query parameters passed to the route.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub invalid_query_params: Vec<String>,
}

impl QueryErrors {
    /// Returns `true` when no error was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invalid_filters.is_empty()
            && self.invalid_language.is_empty()
            && self.invalid_query_params.is_empty()
    }
}

// --- Languages ---

/// Response from `GET /languages`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LanguagesResponse {
    /// Supported languages.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub data: Vec<Language>,
    /// Error message (empty on success).
    #[serde(
        rename = "Error",
        default,
        deserialize_with = "deserialize_null_as_default"
    )]
    pub error: String,
}

/// A language supported by The TVDB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// Language ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub id: u64,
    /// Short code (e.g. `"en"`).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub abbreviation: String,
    /// English name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub english_name: String,
    /// Localized name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub name: String,
}

// --- Search ---

/// Response from `GET /search/series`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchSeriesResponse {
    /// Matching series.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub data: Vec<SeriesSearchResult>,
}

/// A single series search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSearchResult {
    /// The TVDB series ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub id: u64,
    /// Series name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub series_name: String,
    /// Alternative names.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub aliases: Vec<String>,
    /// URL slug.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub slug: String,
    /// Overview text.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub overview: String,
    /// Network name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub network: String,
    /// Airing status (e.g. `"Continuing"`).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub status: String,
    /// First aired date (YYYY-MM-DD).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub first_aired: String,
    /// Banner image path.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub banner: String,
}

// --- Series ---

/// Response from `GET /series/{id}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SeriesResponse {
    /// Series record (absent when the series does not exist).
    #[serde(default)]
    pub data: Option<Series>,
    /// Soft errors.
    #[serde(default)]
    pub errors: Option<QueryErrors>,
}

/// Series details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// The TVDB series ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub id: u64,
    /// Series name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub series_name: String,
    /// Alternative names.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub aliases: Vec<String>,
    /// URL slug.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub slug: String,
    /// Overview text.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub overview: String,
    /// Network name.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub network: String,
    /// Network ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub network_id: String,
    /// Airing status.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub status: String,
    /// First aired date (YYYY-MM-DD).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub first_aired: String,
    /// Banner image path.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub banner: String,
    /// Date the series was added to the catalog.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub added: String,
    /// Day of week the series airs.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub airs_day_of_week: String,
    /// Time of day the series airs.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub airs_time: String,
    /// Genres.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub genre: Vec<String>,
    /// Content rating (e.g. `"TV-PG"`).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub rating: String,
    /// Runtime in minutes.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub runtime: String,
    /// Legacy series ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub series_id: String,
    /// Site rating.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub site_rating: f64,
    /// Number of site ratings.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub site_rating_count: u32,
    /// IMDB ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub imdb_id: String,
    /// Zap2it ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub zap2it_id: String,
    /// Last update (Unix timestamp).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub last_updated: i64,
}

// --- Episodes ---

/// Response from `GET /series/{id}/episodes[/query]`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EpisodesResponse {
    /// Episodes of the requested page.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub data: Vec<Episode>,
    /// Soft errors.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub errors: QueryErrors,
    /// Page cursor.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub links: Pages,
}

/// Page cursor returned alongside an episode listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pages {
    /// First page number.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub first: u32,
    /// Last page number.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub last: u32,
    /// Next page number (0 on the last page).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub next: u32,
    /// Previous page number (0 on the first page).
    #[serde(
        alias = "prev",
        default,
        deserialize_with = "deserialize_null_as_default"
    )]
    pub previous: u32,
}

/// A single episode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// The TVDB episode ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub id: u64,
    /// Parent series ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub series_id: u64,
    /// Aired season number.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub aired_season: u32,
    /// Aired episode number within the season.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub aired_episode_number: u32,
    /// DVD season number.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub dvd_season: u32,
    /// DVD episode number within the season.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub dvd_episode_number: u32,
    /// Absolute episode number.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub absolute_number: u32,
    /// Special: airs after this season.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub airs_after_season: u32,
    /// Special: airs before this episode.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub airs_before_episode: u32,
    /// Special: airs before this season.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub airs_before_season: u32,
    /// DVD chapter.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub dvd_chapter: u32,
    /// DVD disc ID.
    #[serde(
        rename = "dvdDiscid",
        default,
        deserialize_with = "deserialize_null_as_default"
    )]
    pub dvd_disc_id: String,
    /// Episode title.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub episode_name: String,
    /// Overview text.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub overview: String,
    /// First aired date (YYYY-MM-DD).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub first_aired: String,
    /// Director (legacy single-value field).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub director: String,
    /// Directors.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub directors: Vec<String>,
    /// Writers.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub writers: Vec<String>,
    /// Guest stars.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub guest_stars: Vec<String>,
    /// IMDB ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub imdb_id: String,
    /// Production code.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub production_code: String,
    /// Show URL.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub show_url: String,
    /// Site rating.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub site_rating: f64,
    /// Number of site ratings.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub site_rating_count: u32,
    /// Last update (Unix timestamp).
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub last_updated: i64,
    /// ID of the last editor.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub last_updated_by: u64,
    /// Thumbnail path.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub filename: String,
    /// Thumbnail upload date.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub thumb_added: String,
    /// Thumbnail uploader ID.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub thumb_author: u64,
    /// Thumbnail height in pixels.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub thumb_height: String,
    /// Thumbnail width in pixels.
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub thumb_width: String,
}
