//! Episode handlers: the catalogue under `/api/events` and the on-chain
//! episode contracts under `/api/episodes`.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::auth::BearerToken;
use crate::api::dto::{
    ChainEpisodesResponse, EpisodeDashboardDto, EpisodeDetailDto, EpisodeEventsResponse,
    EpisodesResponse, ListQuery, PoolDto,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /api/events`: List catalogue episodes.
///
/// # Errors
///
/// Never fails; unknown filter values yield an empty list.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List insurance episodes",
    description = "Returns the episode catalogue, optionally filtered by status and category. A filter value that names no known status or category matches nothing.",
    params(ListQuery),
    responses(
        (status = 200, description = "Episode list", body = EpisodesResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.episode_service.get_episodes(&query).await))
}

/// `GET /api/events/{id}`: Episode detail with rules.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the episode does not exist.
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Get episode detail",
    description = "Returns one episode together with its covered event, financial terms and resolution rules.",
    params(
        ("id" = String, Path, description = "Episode identifier"),
    ),
    responses(
        (status = 200, description = "Episode detail", body = EpisodeDetailDto),
        (status = 404, description = "Episode not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.episode_service.get_episode_detail(&id).await?))
}

/// `GET /api/events/{id}/pool`: Pool funding an episode.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if no pool funds the episode.
#[utoipa::path(
    get,
    path = "/api/events/{id}/pool",
    tag = "Events",
    summary = "Get the pool of an episode",
    description = "Returns the pool that funds the given episode.",
    params(
        ("id" = String, Path, description = "Episode identifier"),
    ),
    responses(
        (status = 200, description = "Pool", body = PoolDto),
        (status = 404, description = "No pool for this episode", body = ErrorResponse),
    )
)]
pub async fn get_event_pool(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.pool_service.get_pool_for_episode(&id).await?))
}

/// `GET /api/events/{id}/dashboard`: Episode detail with countdowns.
///
/// # Errors
///
/// Returns [`GatewayError::Unauthorized`] without a bearer token and
/// [`GatewayError::NotFound`] if the episode does not exist.
#[utoipa::path(
    get,
    path = "/api/events/{id}/dashboard",
    tag = "Events",
    summary = "Get the dashboard of an episode",
    description = "Returns the episode detail plus the seconds left until the pool closes and the event window ends. Requires a bearer token.",
    params(
        ("id" = String, Path, description = "Episode identifier"),
    ),
    responses(
        (status = 200, description = "Episode dashboard", body = EpisodeDashboardDto),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 404, description = "Episode not found", body = ErrorResponse),
    )
)]
pub async fn get_event_dashboard(
    _token: BearerToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(
        state
            .episode_service
            .get_episode_dashboard(&id, Utc::now())
            .await?,
    ))
}

/// `GET /api/episodes`: Episode contracts deployed by the factory.
///
/// # Errors
///
/// Returns [`GatewayError::Config`] when the factory or explorer is not
/// configured and [`GatewayError::ExternalService`] when the explorer fails.
#[utoipa::path(
    get,
    path = "/api/episodes",
    tag = "Episodes",
    summary = "List on-chain episode contracts",
    description = "Returns the distinct contract addresses created by the episode factory, as reported by the block explorer.",
    responses(
        (status = 200, description = "Episode contract addresses", body = ChainEpisodesResponse),
        (status = 500, description = "Factory or explorer not configured", body = ErrorResponse),
        (status = 502, description = "Block explorer failure", body = ErrorResponse),
    )
)]
pub async fn list_episodes(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.episode_service.get_all_episodes().await?))
}

/// `GET /api/episodes/{address}/events`: Events emitted by an episode.
///
/// # Errors
///
/// Returns [`GatewayError::Config`] when the explorer is not configured and
/// [`GatewayError::ExternalService`] when it fails.
#[utoipa::path(
    get,
    path = "/api/episodes/{address}/events",
    tag = "Episodes",
    summary = "List events of an episode contract",
    description = "Returns the logs emitted by the episode contract, decoded to event names with normalised timestamps and block numbers.",
    params(
        ("address" = String, Path, description = "Episode contract address"),
    ),
    responses(
        (status = 200, description = "Episode events", body = EpisodeEventsResponse),
        (status = 500, description = "Explorer not configured", body = ErrorResponse),
        (status = 502, description = "Block explorer failure", body = ErrorResponse),
    )
)]
pub async fn list_episode_events(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.episode_service.get_episode_events(&address).await?))
}

/// Episode routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events))
        .route("/api/events/{id}", get(get_event))
        .route("/api/events/{id}/pool", get(get_event_pool))
        .route("/api/events/{id}/dashboard", get(get_event_dashboard))
        .route("/api/episodes", get(list_episodes))
        .route("/api/episodes/{address}/events", get(list_episode_events))
}
