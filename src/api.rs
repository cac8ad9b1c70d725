//! Blocking HTTP client for the proxy endpoints, used by the TUI runtime.
//!
//! A transport failure, a non-success HTTP status, and a `success: false`
//! envelope all surface as `Err`; the caller collapses any of them into the
//! error view. No retries; a single failed request is immediately visible.

use anyhow::Result;

use crate::model::{DetailResponse, GameDetail, GameSummary, SearchResponse};

/// Client for the companion proxy server.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: reqwest::blocking::Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /api/games?search={term}`.
    pub fn search_games(&self, term: &str) -> Result<Vec<GameSummary>> {
        let response = self
            .http
            .get(format!("{}/api/games", self.base_url))
            .query(&[("search", term)])
            .send()?;

        if !response.status().is_success() {
            anyhow::bail!("search request failed: {}", response.status());
        }

        let envelope: SearchResponse = response.json()?;
        if !envelope.success {
            anyhow::bail!(
                "{}",
                envelope.error.unwrap_or_else(|| "search failed".to_string())
            );
        }

        Ok(envelope.games.unwrap_or_default())
    }

    /// `GET /api/games/{id}`.
    pub fn game_detail(&self, id: i64) -> Result<GameDetail> {
        let response = self
            .http
            .get(format!("{}/api/games/{}", self.base_url, id))
            .send()?;

        if !response.status().is_success() {
            anyhow::bail!("detail request failed: {}", response.status());
        }

        let envelope: DetailResponse = response.json()?;
        if !envelope.success {
            anyhow::bail!(
                "{}",
                envelope
                    .error
                    .unwrap_or_else(|| "detail fetch failed".to_string())
            );
        }

        envelope
            .game
            .ok_or_else(|| anyhow::anyhow!("detail response carried no game payload"))
    }
}
