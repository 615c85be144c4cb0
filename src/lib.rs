//! News Dashboard - search a news feed and browse the results as cards
//!
//! This crate builds a feed-search URL from a free-text query, fetches and
//! parses the feed, caches the entries per query for a short time-to-live and
//! renders them as a card grid in a web page.

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod query;
pub mod routes;
