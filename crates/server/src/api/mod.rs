//! HTTP routes for record lookup and update.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{GeneralQuery, PokemonDetail, PokemonSummary, PokemonUpdate},
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{
    app_state::AppState,
    pokeapi::{SourceError, UpstreamPokemon},
};

const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/general", get(api_general))
        .route(
            "/api/pokemon/:name_or_id",
            get(api_pokemon).post(api_update_pokemon),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn api_general(
    State(state): State<Arc<AppState>>,
    Query(q): Query<GeneralQuery>,
) -> ApiResult<PokemonSummary> {
    let pokemon = fetch(&state, &q.name).await?;
    let detail = pokemon.into_detail();
    Ok(Json(PokemonSummary {
        url: state.source.resource_url(detail.pokedex_number),
        name: detail.name,
    }))
}

async fn api_pokemon(
    State(state): State<Arc<AppState>>,
    Path(name_or_id): Path<String>,
) -> ApiResult<PokemonDetail> {
    let pokemon = fetch(&state, &name_or_id).await?;
    Ok(Json(pokemon.into_detail()))
}

async fn api_update_pokemon(
    State(state): State<Arc<AppState>>,
    Path(name_or_id): Path<String>,
    Json(update): Json<PokemonUpdate>,
) -> ApiResult<PokemonDetail> {
    let pokemon = fetch(&state, &name_or_id).await?;
    let detail = pokemon.with_update(update);
    info!(
        name = %detail.name,
        abilities = detail.abilities.len(),
        types = detail.types.len(),
        "pokemon update applied"
    );
    Ok(Json(detail))
}

async fn fetch(
    state: &AppState,
    name_or_id: &str,
) -> Result<UpstreamPokemon, (StatusCode, Json<ApiError>)> {
    state.source.fetch(name_or_id).await.map_err(|err| {
        warn!(name_or_id, error = %err, "pokemon lookup failed");
        source_failure(err)
    })
}

fn source_failure(err: SourceError) -> (StatusCode, Json<ApiError>) {
    match err {
        SourceError::Status { status } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(ApiError::new(
                ErrorCode::for_upstream_status(status),
                "could not fetch Pokémon data",
            )),
        ),
        SourceError::Transport(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ApiError::new(ErrorCode::Upstream, e.to_string())),
        ),
        SourceError::Url(_) | SourceError::NotABase(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(ErrorCode::Internal, err.to_string())),
        ),
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
