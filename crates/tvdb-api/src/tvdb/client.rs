//! `TvdbClient` - The TVDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalTvdbApi;
use super::error::ApiError;
use super::params::{QueryOption, QueryParams, RequestOption};
use super::types::{
    Episode, EpisodesResponse, Language, LanguagesResponse, LoginRequest, QueryErrors,
    SearchSeriesResponse, Series, SeriesResponse, SeriesSearchResult, TokenResponse,
};

/// Default base URL for The TVDB API v2.
const DEFAULT_BASE_URL: &str = "https://api.thetvdb.com/";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Media type sent in `Accept`.
const APPLICATION_JSON: &str = "application/json";

/// Credentials and defaults for a `TvdbClient`.
///
/// The server requires either `api_key`, or `user_key` and `username`.
/// Empty fields are sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// API key.
    pub api_key: String,
    /// User key.
    pub user_key: String,
    /// Username.
    pub username: String,
    /// Default response language (e.g. `"en"`). Empty means server default.
    pub language: String,
}

/// Builds a request URL from `base_url`, a resource `path` and query options.
///
/// Options are folded left to right; the query string is only set when at
/// least one option is given.
///
/// # Errors
///
/// Returns an error if `path` cannot be joined onto `base_url`.
pub fn build_url(base_url: &Url, path: &str, options: &[QueryOption]) -> Result<Url> {
    // `Url::join` replaces the last segment unless the base path ends in `/`.
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let dir_path = format!("{}/", base.path());
        base.set_path(&dir_path);
    }

    let mut url = base
        .join(path.trim_start_matches('/'))
        .with_context(|| format!("failed to join URL path: {path}"))?;

    if !options.is_empty() {
        let params = QueryParams::from_options(options);
        url.query_pairs_mut().clear().extend_pairs(params.iter());
    }
    Ok(url)
}

/// The TVDB API client.
///
/// Holds the bearer token obtained at construction. The token is never
/// refreshed.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer token.
    token: String,
    /// Time the token was issued.
    token_issued_at: DateTime<Utc>,
    /// Credentials and default language.
    options: ClientOptions,
}

/// Builder for `TvdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvdbClientBuilder {
    base_url: Option<Url>,
    options: ClientOptions,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TvdbClientBuilder {
    /// Creates a new builder.
    fn new() -> Self {
        Self {
            base_url: None,
            options: ClientOptions::default(),
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Replaces all credentials and the default language.
    #[must_use]
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.options.api_key = api_key.into();
        self
    }

    /// Sets the user key.
    #[must_use]
    pub fn user_key(mut self, user_key: impl Into<String>) -> Self {
        self.options.user_key = user_key.into();
        self
    }

    /// Sets the username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.options.username = username.into();
        self
    }

    /// Sets the default response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.options.language = language.into();
        self
    }

    /// Sets the User-Agent (default: `tvdb-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client and logs in.
    ///
    /// No client is returned unless login succeeds.
    ///
    /// # Errors
    ///
    /// - `reqwest::Client` build fails.
    /// - The login request fails or its response cannot be decoded.
    /// - The server rejects the credentials ([`ApiError::Login`]).
    pub async fn build(self) -> Result<TvdbClient> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        let token = login(&http_client, &base_url, &self.options)
            .await
            .context("login failed")?;

        Ok(TvdbClient {
            http_client,
            base_url,
            token,
            token_issued_at: Utc::now(),
            options: self.options,
        })
    }
}

/// Exchanges credentials for a bearer token via `POST /login`.
#[instrument(skip_all)]
async fn login(http_client: &Client, base_url: &Url, options: &ClientOptions) -> Result<String> {
    let url = build_url(base_url, "login", &[])?;
    let body = LoginRequest {
        api_key: &options.api_key,
        user_key: &options.user_key,
        username: &options.username,
    };

    tracing::debug!(url = %url, "TVDB login request");

    let result = http_client
        .post(url)
        .header(ACCEPT, APPLICATION_JSON)
        .json(&body)
        .send()
        .await;
    let response = result.context("login request failed")?;

    tracing::debug!(status = %response.status(), "TVDB login response");

    let text = response
        .text()
        .await
        .context("failed to read login response body")?;
    let raw_result: std::result::Result<TokenResponse, _> = serde_json::from_str(&text);
    let token = raw_result.context("failed to decode login response")?;

    if !token.error.is_empty() {
        return Err(ApiError::Login(token.error).into());
    }
    Ok(token.token)
}

/// Logs soft errors the API reported next to a payload.
fn warn_on_query_errors(resource: &str, errors: &QueryErrors) {
    if errors.is_empty() {
        return;
    }
    tracing::warn!(
        resource,
        invalid_filters = ?errors.invalid_filters,
        invalid_language = %errors.invalid_language,
        invalid_query_params = ?errors.invalid_query_params,
        "TVDB API reported query errors"
    );
}

impl TvdbClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> TvdbClientBuilder {
        TvdbClientBuilder::new()
    }

    /// Creates a client for the default endpoint and logs in.
    ///
    /// # Errors
    ///
    /// See [`TvdbClientBuilder::build`].
    pub async fn new(options: ClientOptions) -> Result<Self> {
        Self::builder().options(options).build().await
    }

    /// Builds a request URL for `path` against this client's base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be joined onto the base URL.
    pub fn url(&self, path: &str, options: &[QueryOption]) -> Result<Url> {
        build_url(&self.base_url, path, options)
    }

    /// Returns the bearer token used for authentication.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the time the token was issued.
    #[must_use]
    pub const fn token_issued_at(&self) -> DateTime<Utc> {
        self.token_issued_at
    }

    /// Returns a copy of the client options.
    #[must_use]
    pub fn options(&self) -> ClientOptions {
        self.options.clone()
    }

    /// Updates the default language of this client in place.
    ///
    /// Subsequent requests carry `Accept-Language: <language>`.
    pub fn with_language(&mut self, language: impl Into<String>) -> &mut Self {
        self.options.language = language.into();
        self
    }

    /// Header option for the configured language.
    fn language_option(&self) -> RequestOption {
        RequestOption::Language(self.options.language.clone())
    }

    /// Sends an authenticated GET request and decodes the JSON body.
    ///
    /// The HTTP status is not interpreted; whatever body the server returns
    /// is decoded into `T`.
    #[instrument(skip_all)]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[QueryOption],
        request_options: &[RequestOption],
    ) -> Result<T> {
        let url = self.url(path, query)?;

        let mut headers = HeaderMap::new();
        for option in request_options {
            option.apply(&mut headers)?;
        }

        let request = self
            .http_client
            .get(url)
            .headers(headers)
            .bearer_auth(&self.token)
            .header(ACCEPT, APPLICATION_JSON)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "TVDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        tracing::debug!(status = %response.status(), "TVDB API response");

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl LocalTvdbApi for TvdbClient {
    #[instrument(skip_all)]
    async fn languages(&self) -> Result<Vec<Language>> {
        let response: LanguagesResponse = self.get_json("languages", &[], &[]).await?;
        if !response.error.is_empty() {
            return Err(ApiError::Languages {
                message: response.error,
                data: response.data,
            }
            .into());
        }
        Ok(response.data)
    }

    #[instrument(skip_all)]
    async fn series_by_id(&self, id: u64) -> Result<Series> {
        let path = format!("series/{id}");
        let response: SeriesResponse = self
            .get_json(&path, &[], &[self.language_option()])
            .await?;
        if let Some(ref errors) = response.errors {
            warn_on_query_errors(&path, errors);
        }
        Ok(response.data.unwrap_or_default())
    }

    #[instrument(skip_all)]
    async fn search_series_by_name(&self, name: &str) -> Result<Vec<SeriesSearchResult>> {
        let query = [QueryOption::name(name)];
        let response: SearchSeriesResponse = self
            .get_json("search/series", &query, &[self.language_option()])
            .await?;
        Ok(response.data)
    }

    #[instrument(skip_all)]
    async fn episodes_by_series_id(
        &self,
        series_id: u64,
        filters: &[QueryOption],
    ) -> Result<Vec<Episode>> {
        let path = if filters.is_empty() {
            format!("series/{series_id}/episodes")
        } else {
            format!("series/{series_id}/episodes/query")
        };
        let request_options = [self.language_option()];

        let mut episodes: Vec<Episode> = Vec::new();
        let mut page: u32 = 1;

        // The last page number is only known once a page has been decoded,
        // so the bound is re-read after every response.
        loop {
            let mut query = filters.to_vec();
            query.push(QueryOption::page(page));

            let response: EpisodesResponse = self
                .get_json(&path, &query, &request_options)
                .await
                .with_context(|| {
                    format!("failed to fetch episodes page {page} of series {series_id}")
                })?;
            warn_on_query_errors(&path, &response.errors);

            let last = response.links.last;
            tracing::debug!(
                page,
                last,
                fetched = response.data.len(),
                "episodes page completed"
            );
            episodes.extend(response.data);

            if page >= last {
                break;
            }
            page = page.checked_add(1).context("page counter overflow")?;
        }

        Ok(episodes)
    }
}
