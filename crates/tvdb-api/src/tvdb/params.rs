//! Request options applied to outgoing requests.
//!
//! Options are applied left to right. A later option overwrites an earlier
//! one on the same key, so repeating a filter converges to its last value.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

/// A query-string option (filter) for an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOption {
    /// Query parameter name.
    key: &'static str,
    /// Encoded value.
    value: String,
}

impl QueryOption {
    /// Filters episodes by aired season number.
    #[must_use]
    pub fn aired_season(season_number: u32) -> Self {
        Self::int("airedSeason", season_number)
    }

    /// Filters episodes by aired episode number.
    #[must_use]
    pub fn aired_episode(episode_number: u32) -> Self {
        Self::int("airedEpisode", episode_number)
    }

    /// Filters episodes by DVD season number.
    #[must_use]
    pub fn dvd_season(season_number: u32) -> Self {
        Self::int("dvdSeason", season_number)
    }

    /// Filters episodes by DVD episode number.
    #[must_use]
    pub fn dvd_episode(episode_number: u32) -> Self {
        Self::int("dvdEpisode", episode_number)
    }

    /// Filters episodes by absolute episode number.
    #[must_use]
    pub fn absolute_number(episode_number: u32) -> Self {
        Self::int("absoluteNumber", episode_number)
    }

    /// Free-text series name (search only).
    pub(crate) fn name(name: &str) -> Self {
        Self {
            key: "name",
            value: String::from(name),
        }
    }

    /// Page number (pagination only).
    pub(crate) fn page(page: u32) -> Self {
        Self::int("page", page)
    }

    fn int(key: &'static str, value: u32) -> Self {
        Self {
            key,
            value: value.to_string(),
        }
    }

    /// Query parameter name.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Encoded query parameter value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets this option on `params`, replacing any previous value.
    pub fn apply(&self, params: &mut QueryParams) {
        params.set(self.key, self.value.clone());
    }
}

/// Query parameters carrier, keyed by name.
///
/// Iterates in key order, which keeps encoded URLs stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<&'static str, String>);

impl QueryParams {
    /// Folds `options` left to right into a new carrier.
    #[must_use]
    pub fn from_options(options: &[QueryOption]) -> Self {
        let mut params = Self::default();
        for option in options {
            option.apply(&mut params);
        }
        params
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: &'static str, value: String) {
        self.0.insert(key, value);
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

/// A header option for an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestOption {
    /// `Accept-Language`, set only when non-empty.
    Language(String),
}

impl RequestOption {
    /// Applies this option to `headers`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid header value.
    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        match self {
            Self::Language(language) => {
                if language.is_empty() {
                    return Ok(());
                }
                let value = HeaderValue::from_str(language)
                    .with_context(|| format!("invalid language header value: {language:?}"))?;
                headers.insert(ACCEPT_LANGUAGE, value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_filters_encode_decimal_values() {
        // Arrange & Act
        let params = QueryParams::from_options(&[
            QueryOption::aired_season(0),
            QueryOption::aired_episode(12),
            QueryOption::dvd_season(3),
            QueryOption::dvd_episode(4),
            QueryOption::absolute_number(250),
        ]);

        // Assert
        assert_eq!(params.len(), 5);
        assert_eq!(params.get("airedSeason"), Some("0"));
        assert_eq!(params.get("airedEpisode"), Some("12"));
        assert_eq!(params.get("dvdSeason"), Some("3"));
        assert_eq!(params.get("dvdEpisode"), Some("4"));
        assert_eq!(params.get("absoluteNumber"), Some("250"));
    }

    #[test]
    fn test_repeated_key_last_value_wins() {
        // Arrange
        let options = [
            QueryOption::aired_season(1),
            QueryOption::aired_episode(2),
            QueryOption::aired_season(5),
            QueryOption::aired_season(8),
        ];

        // Act
        let params = QueryParams::from_options(&options);

        // Assert
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("airedSeason"), Some("8"));
        assert_eq!(params.get("airedEpisode"), Some("2"));
    }

    #[test]
    fn test_repeated_application_converges() {
        // Arrange
        let option = QueryOption::dvd_season(4);
        let mut params = QueryParams::default();

        // Act
        option.apply(&mut params);
        option.apply(&mut params);

        // Assert
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("dvdSeason"), Some("4"));
    }

    #[test]
    fn test_page_overrides_previous_page() {
        // Arrange & Act
        let params = QueryParams::from_options(&[QueryOption::page(1), QueryOption::page(3)]);

        // Assert
        assert_eq!(params.get("page"), Some("3"));
    }

    #[test]
    fn test_iter_is_key_ordered() {
        // Arrange
        let params = QueryParams::from_options(&[
            QueryOption::page(2),
            QueryOption::aired_season(1),
            QueryOption::name("x"),
        ]);

        // Act
        let keys: Vec<&str> = params.iter().map(|(key, _)| key).collect();

        // Assert
        assert_eq!(keys, vec!["airedSeason", "name", "page"]);
    }

    #[test]
    fn test_language_sets_header() {
        // Arrange
        let mut headers = HeaderMap::new();

        // Act
        RequestOption::Language(String::from("fr"))
            .apply(&mut headers)
            .unwrap();

        // Assert
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "fr");
    }

    #[test]
    fn test_empty_language_is_skipped() {
        // Arrange
        let mut headers = HeaderMap::new();

        // Act
        RequestOption::Language(String::new())
            .apply(&mut headers)
            .unwrap();

        // Assert
        assert!(headers.get(ACCEPT_LANGUAGE).is_none());
    }

    #[test]
    fn test_language_last_value_wins() {
        // Arrange
        let mut headers = HeaderMap::new();

        // Act
        for option in [
            RequestOption::Language(String::from("en")),
            RequestOption::Language(String::from("ja")),
        ] {
            option.apply(&mut headers).unwrap();
        }

        // Assert
        assert_eq!(headers.get_all(ACCEPT_LANGUAGE).iter().count(), 1);
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "ja");
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        // Arrange
        let mut headers = HeaderMap::new();

        // Act
        let result = RequestOption::Language(String::from("fr\n")).apply(&mut headers);

        // Assert
        assert!(result.is_err());
    }
}
