//! Pool service: catalogue queries over the pool repository.

use std::sync::Arc;

use crate::api::dto::{ListQuery, PoolDto, PoolsResponse};
use crate::domain::{Category, Pool, PoolStatus};
use crate::error::GatewayError;
use crate::repository::PoolRepository;

/// Read-side orchestration for pools.
#[derive(Debug, Clone)]
pub struct PoolService {
    pools: Arc<PoolRepository>,
}

impl PoolService {
    /// Creates a new `PoolService`.
    #[must_use]
    pub fn new(pools: Arc<PoolRepository>) -> Self {
        Self { pools }
    }

    /// Lists pools filtered by status and/or category.
    pub async fn get_pools(&self, query: &ListQuery) -> PoolsResponse {
        let items = self.filter(query).await;
        PoolsResponse::new(items.iter().map(PoolDto::from).collect())
    }

    async fn filter(&self, query: &ListQuery) -> Vec<Pool> {
        let status = query.status.as_deref().map(str::parse::<PoolStatus>);
        let category = query.category.as_deref().map(str::parse::<Category>);
        match (status, category) {
            (Some(Ok(s)), Some(Ok(c))) => self.pools.find_by_status_and_category(s, c).await,
            (Some(Ok(s)), None) => self.pools.find_by_status(s).await,
            (None, Some(Ok(c))) => self.pools.find_by_category(c).await,
            (None, None) => self.pools.find_all().await,
            _ => Vec::new(),
        }
    }

    /// Returns the pool funding episode `event_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if no pool funds the episode.
    pub async fn get_pool_for_episode(&self, event_id: &str) -> Result<PoolDto, GatewayError> {
        self.pools
            .find_by_event_id(event_id)
            .await
            .map(|p| PoolDto::from(&p))
            .ok_or_else(|| GatewayError::not_found("pool", event_id))
    }
}
