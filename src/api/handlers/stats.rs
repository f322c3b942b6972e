//! Landing-page statistics handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::HomeStatsDto;
use crate::app_state::AppState;
use crate::error::GatewayError;

/// `GET /api/stats/home`: Landing-page statistics.
///
/// # Errors
///
/// Never fails.
#[utoipa::path(
    get,
    path = "/api/stats/home",
    tag = "Stats",
    summary = "Home statistics",
    description = "Returns total value locked, policy count, claim rate and average payout time aggregated over all pools and transactions.",
    responses(
        (status = 200, description = "Home statistics", body = HomeStatsDto),
    )
)]
pub async fn home_stats(State(state): State<AppState>) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.stats_service.get_home_stats().await))
}

/// Stats routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/stats/home", get(home_stats))
}
