//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{
    EpisodeService, PoolService, StatsService, TransactionService, UserEpisodeService,
};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalogue and on-chain episode queries.
    pub episode_service: Arc<EpisodeService>,
    /// Pool listing and per-episode lookup.
    pub pool_service: Arc<PoolService>,
    /// Transaction feed and its statistics.
    pub transaction_service: Arc<TransactionService>,
    /// Landing-page statistics.
    pub stats_service: Arc<StatsService>,
    /// User/episode associations in the hosted database.
    pub user_episode_service: Arc<UserEpisodeService>,
}
