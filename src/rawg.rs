//! Client for the RAWG game database API.
//!
//! This is the only module that sees the upstream schema. Everything it
//! returns is already projected into the reduced types from [`crate::model`],
//! so unrelated upstream fields never leak past this boundary.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{GameDetail, GameSummary};

/// Result-size cap sent with every search request.
pub const PAGE_SIZE: u32 = 10;

const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Failure modes of an upstream call.
#[derive(Debug, Error)]
pub enum RawgError {
    /// The upstream answered with a non-success HTTP status.
    #[error("upstream returned {status}")]
    Status { status: reqwest::StatusCode },
    /// The upstream does not know the requested game id.
    #[error("game not found upstream")]
    NotFound,
    /// Connection failure, or a response body that did not match the
    /// expected shape.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Thin handle over the RAWG REST API.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted
/// and the credential is read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct RawgClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RawgClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Points the client at a non-default upstream. Used by tests to target
    /// a local fixture server.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Searches the upstream for `term`, capped at [`PAGE_SIZE`] results.
    pub async fn search_games(&self, term: &str) -> Result<Vec<GameSummary>, RawgError> {
        let page_size = PAGE_SIZE.to_string();
        let response = self
            .http
            .get(format!("{}/games", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("search", term),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RawgError::Status {
                status: response.status(),
            });
        }

        let page: SearchPage = response.json().await?;
        Ok(page.results.into_iter().map(GameSummary::from).collect())
    }

    /// Fetches a single game record.
    ///
    /// `id` is forwarded verbatim as a path segment; the caller performs no
    /// numeric validation, so a garbage id simply comes back as an upstream
    /// failure.
    pub async fn game_detail(&self, id: &str) -> Result<GameDetail, RawgError> {
        let response = self
            .http
            .get(format!("{}/games/{}", self.base_url, id))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RawgError::NotFound);
        }
        if !response.status().is_success() {
            return Err(RawgError::Status {
                status: response.status(),
            });
        }

        let raw: RawGameDetail = response.json().await?;
        Ok(GameDetail::from(raw))
    }
}

// ---------------------------------------------------------------------------
// Upstream schema (the subset this proxy reads)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<RawGame>,
}

#[derive(Debug, Deserialize)]
struct RawGame {
    id: i64,
    name: String,
    released: Option<String>,
    background_image: Option<String>,
    platforms: Option<Vec<PlatformEntry>>,
}

/// The upstream nests each platform name as `{"platform": {"name": ...}}`.
#[derive(Debug, Deserialize)]
struct PlatformEntry {
    platform: NamedRef,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawGameDetail {
    id: i64,
    name: String,
    released: Option<String>,
    background_image: Option<String>,
    description_raw: Option<String>,
    platforms: Option<Vec<PlatformEntry>>,
    #[serde(default)]
    genres: Vec<NamedRef>,
    rating: Option<f64>,
    ratings_count: Option<i64>,
}

fn platform_names(platforms: Option<Vec<PlatformEntry>>) -> Vec<String> {
    platforms
        .map(|entries| entries.into_iter().map(|e| e.platform.name).collect())
        .unwrap_or_default()
}

impl From<RawGame> for GameSummary {
    fn from(raw: RawGame) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            released: raw.released,
            background_image: raw.background_image,
            platforms: platform_names(raw.platforms),
        }
    }
}

impl From<RawGameDetail> for GameDetail {
    fn from(raw: RawGameDetail) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            released: raw.released,
            background_image: raw.background_image,
            description: raw.description_raw.unwrap_or_default(),
            platforms: platform_names(raw.platforms),
            genres: raw.genres.into_iter().map(|g| g.name).collect(),
            rating: raw.rating,
            ratings_count: raw.ratings_count.unwrap_or(0),
        }
    }
}
