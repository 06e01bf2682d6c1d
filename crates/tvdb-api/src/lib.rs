//! API client library for The TVDB.
//!
//! Provides an authenticated client for The TVDB API v2.

/// The TVDB API client.
pub mod tvdb;
