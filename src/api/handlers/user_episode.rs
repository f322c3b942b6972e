//! User/episode association handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    CreateUserEpisodeRequest, UserEpisodeDto, UserEpisodeListing, UserEpisodeQuery,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /api/user-episodes`: Record a user joining an episode.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] for an empty field,
/// [`GatewayError::UninitializedDependency`] when the database is not
/// configured and [`GatewayError::ExternalService`] when it fails.
#[utoipa::path(
    post,
    path = "/api/user-episodes",
    tag = "User Episodes",
    summary = "Create a user/episode association",
    description = "Stores that the user engaged with the episode and returns the stored row.",
    request_body = CreateUserEpisodeRequest,
    responses(
        (status = 201, description = "Association created", body = UserEpisodeDto),
        (status = 400, description = "Missing user or episode", body = ErrorResponse),
        (status = 502, description = "Database failure", body = ErrorResponse),
        (status = 503, description = "Database not configured", body = ErrorResponse),
    )
)]
pub async fn create_user_episode(
    State(state): State<AppState>,
    Json(req): Json<CreateUserEpisodeRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let created = state
        .user_episode_service
        .create_user_episode(&req.user, &req.episode)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/user-episodes`: Associations of a user or of an episode.
///
/// `user` takes precedence when both filters are sent.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] when neither filter is sent, plus
/// the conditions of [`create_user_episode`].
#[utoipa::path(
    get,
    path = "/api/user-episodes",
    tag = "User Episodes",
    summary = "List user/episode associations",
    description = "With `user`, returns the episodes that user engaged with as `{episodes}`. With `episode`, returns the users engaged with it as `{users}`.",
    params(UserEpisodeQuery),
    responses(
        (status = 200, description = "Associations matching the filter", body = UserEpisodeListing),
        (status = 400, description = "Neither user nor episode given", body = ErrorResponse),
        (status = 502, description = "Database failure", body = ErrorResponse),
        (status = 503, description = "Database not configured", body = ErrorResponse),
    )
)]
pub async fn list_user_episodes(
    State(state): State<AppState>,
    Query(query): Query<UserEpisodeQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let service = &state.user_episode_service;
    let listing = match (query.user, query.episode) {
        (Some(user), _) => UserEpisodeListing::ByUser(service.get_user_episodes(&user).await?),
        (None, Some(episode)) => {
            UserEpisodeListing::ByEpisode(service.get_episode_users(&episode).await?)
        }
        (None, None) => {
            return Err(GatewayError::Validation(
                "either user or episode is required".to_string(),
            ));
        }
    };
    Ok(Json(listing))
}

/// User/episode routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/user-episodes",
        get(list_user_episodes).post(create_user_episode),
    )
}
