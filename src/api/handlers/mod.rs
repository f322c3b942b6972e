//! REST endpoint handlers organized by resource.

pub mod episode;
pub mod pool;
pub mod stats;
pub mod system;
pub mod transaction;
pub mod user_episode;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(episode::routes())
        .merge(pool::routes())
        .merge(transaction::routes())
        .merge(stats::routes())
        .merge(user_episode::routes())
}
