//! Transaction feed and statistics handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{TransactionQuery, TransactionStatsDto, TransactionsResponse};
use crate::app_state::AppState;
use crate::error::GatewayError;

/// `GET /api/transactions`: Paginated transaction feed.
///
/// # Errors
///
/// Never fails; invalid paging values fall back to their defaults.
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    summary = "List transactions",
    description = "Returns the newest-first transaction feed filtered by type, episode and pool. `limit` accepts 1 to 100 (default 20) and `offset` defaults to 0; invalid values fall back to the defaults.",
    params(TransactionQuery),
    responses(
        (status = 200, description = "Transaction page", body = TransactionsResponse),
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.transaction_service.get_transactions(&query).await))
}

/// `GET /api/transactions/stats`: Transaction dashboard statistics.
///
/// # Errors
///
/// Never fails.
#[utoipa::path(
    get,
    path = "/api/transactions/stats",
    tag = "Transactions",
    summary = "Transaction statistics",
    description = "Returns the 24 hour volume, active policies, throughput and network figures.",
    responses(
        (status = 200, description = "Transaction statistics", body = TransactionStatsDto),
    )
)]
pub async fn transaction_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(
        state
            .transaction_service
            .get_transaction_stats(Utc::now())
            .await,
    ))
}

/// Transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/transactions", get(list_transactions))
        .route("/api/transactions/stats", get(transaction_stats))
}
