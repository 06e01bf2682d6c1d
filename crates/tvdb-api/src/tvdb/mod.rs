//! The TVDB API client module.
//!
//! Logs in with an API key, then queries languages, series and
//! episodes from The TVDB API v2.

mod api;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTvdbApi, TvdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{ClientOptions, TvdbClient, TvdbClientBuilder, build_url};
pub use error::ApiError;
pub use params::{QueryOption, QueryParams};
pub use types::{Episode, Language, Pages, QueryErrors, Series, SeriesSearchResult};
