//! Pool listing handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ListQuery, PoolsResponse};
use crate::app_state::AppState;
use crate::error::GatewayError;

/// `GET /api/pools`: List risk pools.
///
/// # Errors
///
/// Never fails; unknown filter values yield an empty list.
#[utoipa::path(
    get,
    path = "/api/pools",
    tag = "Pools",
    summary = "List pools",
    description = "Returns all risk pools, optionally filtered by status and category.",
    params(ListQuery),
    responses(
        (status = 200, description = "Pool list", body = PoolsResponse),
    )
)]
pub async fn list_pools(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.pool_service.get_pools(&query).await))
}

/// Pool routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/pools", get(list_pools))
}
