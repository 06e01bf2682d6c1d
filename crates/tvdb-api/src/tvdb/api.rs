//! `TvdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::QueryOption;
use super::types::{Episode, Language, Series, SeriesSearchResult};

/// The TVDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TvdbApi: Send)]
pub trait LocalTvdbApi {
    /// Lists the languages supported by The TVDB.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails,
    /// or if the response carries an error message.
    async fn languages(&self) -> Result<Vec<Language>>;

    /// Fetches a single series in the client language.
    ///
    /// An unknown ID yields `Series::default()`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn series_by_id(&self, id: u64) -> Result<Series>;

    /// Searches series by name in the client language.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_series_by_name(&self, name: &str) -> Result<Vec<SeriesSearchResult>>;

    /// Fetches every episode of a series, following pagination.
    ///
    /// Without filters all episodes are returned; with filters only the
    /// matching ones (e.g. a season, or a single episode of a season).
    ///
    /// # Errors
    ///
    /// Returns an error if any page request or its JSON parsing fails.
    /// Pages fetched before the failure are discarded.
    async fn episodes_by_series_id(
        &self,
        series_id: u64,
        filters: &[QueryOption],
    ) -> Result<Vec<Episode>>;
}
