//! HTTP facade over the RAWG upstream.
//!
//! Two stateless JSON endpoints, one upstream call each. Failures are logged
//! with full detail server-side and collapsed into a fixed generic message so
//! upstream error text and the API key never reach a caller.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::model::{DetailResponse, SearchResponse};
use crate::rawg::RawgClient;

/// Generic error returned by `GET /api/games`. Part of the wire contract.
pub const SEARCH_ERROR: &str = "Erro ao buscar jogos";
/// Generic error returned by `GET /api/games/{id}`. Part of the wire contract.
pub const DETAIL_ERROR: &str = "Erro ao buscar detalhes do jogo";

/// Builds the application router. The cloned [`RawgClient`] is the only
/// shared state; handlers keep nothing between requests.
pub fn router(rawg: RawgClient) -> Router {
    Router::new()
        .route("/api/games", get(search_games))
        .route("/api/games/{id}", get(game_detail))
        .layer(CorsLayer::permissive())
        .with_state(rawg)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    /// Absent and empty both forward an empty term to the upstream.
    #[serde(default)]
    search: String,
}

async fn search_games(
    State(rawg): State<RawgClient>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<SearchResponse>) {
    match rawg.search_games(&params.search).await {
        Ok(games) => (StatusCode::OK, Json(SearchResponse::ok(games))),
        Err(err) => {
            log::error!("search for {:?} failed: {}", params.search, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse::failed(SEARCH_ERROR)),
            )
        }
    }
}

async fn game_detail(
    State(rawg): State<RawgClient>,
    Path(id): Path<String>,
) -> (StatusCode, Json<DetailResponse>) {
    // The id is forwarded verbatim; validation is left to the upstream.
    match rawg.game_detail(&id).await {
        Ok(game) => (StatusCode::OK, Json(DetailResponse::ok(game))),
        Err(err) => {
            log::error!("detail fetch for id {:?} failed: {}", id, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetailResponse::failed(DETAIL_ERROR)),
            )
        }
    }
}
