//! Reduced game projections and wire envelopes shared by the proxy server
//! and the TUI client.
//!
//! These are the only shapes that ever cross the client/server boundary.
//! The raw upstream schema stays confined to the `rawg` module.

use serde::{Deserialize, Serialize};

/// A single search result as returned by `GET /api/games`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Upstream-assigned unique identifier.
    pub id: i64,
    pub name: String,
    /// ISO 8601 release date, absent when the upstream does not know it.
    pub released: Option<String>,
    /// Cover image URL, absent when the upstream has none.
    pub background_image: Option<String>,
    /// Ordered platform names, possibly empty.
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// A single game record as returned by `GET /api/games/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetail {
    pub id: i64,
    pub name: String,
    pub released: Option<String>,
    pub background_image: Option<String>,
    /// Plain-text description. Empty when the upstream omits it, never absent.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Ordered genre names, possibly empty.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Average rating on a 0–5 scale, absent when the upstream omits it.
    pub rating: Option<f64>,
    /// Number of ratings behind `rating`. Zero when the upstream omits it.
    #[serde(default)]
    pub ratings_count: i64,
}

/// Envelope for `GET /api/games`.
///
/// Exactly one of `games` / `error` is present depending on `success`;
/// the other field is omitted from the serialized JSON entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games: Option<Vec<GameSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn ok(games: Vec<GameSummary>) -> Self {
        Self {
            success: true,
            games: Some(games),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            games: None,
            error: Some(message.into()),
        }
    }
}

/// Envelope for `GET /api/games/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetailResponse {
    pub fn ok(game: GameDetail) -> Self {
        Self {
            success: true,
            game: Some(game),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            game: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_omits_error() {
        let envelope = SearchResponse::ok(vec![]);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["games"], json!([]));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_omits_payload() {
        let envelope = DetailResponse::failed("Erro ao buscar detalhes do jogo");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("Erro ao buscar detalhes do jogo"));
        assert!(value.get("game").is_none());
    }

    #[test]
    fn test_summary_defaults_for_absent_fields() {
        let summary: GameSummary = serde_json::from_value(json!({
            "id": 42,
            "name": "Elden Ring"
        }))
        .unwrap();

        assert_eq!(summary.id, 42);
        assert!(summary.released.is_none());
        assert!(summary.background_image.is_none());
        assert!(summary.platforms.is_empty());
    }

    #[test]
    fn test_detail_description_defaults_to_empty_string() {
        let detail: GameDetail = serde_json::from_value(json!({
            "id": 1,
            "name": "Some Game"
        }))
        .unwrap();

        assert_eq!(detail.description, "");
        assert_eq!(detail.ratings_count, 0);
        assert!(detail.rating.is_none());
        assert!(detail.genres.is_empty());
    }
}
