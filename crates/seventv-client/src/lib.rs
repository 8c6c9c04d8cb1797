//! 7TV integration client library.
//!
//! Provides the emote catalog search controller, the cosmetic badge cache,
//! and the HTTP client that backs both.

pub mod badges;
pub mod client;
pub mod gql;
pub mod models;
pub mod search;
pub mod settings;

pub use badges::{BadgeCache, BadgeResolver};
pub use client::{CatalogTransport, SevenTvClient};
pub use search::{FetchOutcome, SearchController};
pub use settings::Settings;

/// Default GraphQL endpoint for catalog and cosmetics queries.
pub const GQL_URL: &str = "https://7tv.io/v3/gql";

/// Default REST base for identity lookups.
pub const API_BASE: &str = "https://7tv.io/v3";

/// Unified error type for the seventv-client crate.
#[derive(Debug, thiserror::Error)]
pub enum SevenTvError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("7TV API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    Gql(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}
