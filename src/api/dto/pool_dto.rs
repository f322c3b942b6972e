//! Pool DTOs for list and per-episode lookups.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::common_dto::{LIST_LIMIT, LIST_PAGE};
use crate::domain::{Category, Icon, Pool, PoolStatus};

/// Pool projection.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolDto {
    /// Pool identifier.
    pub id: String,
    /// Episode this pool funds.
    pub event_id: String,
    /// Insured event kind.
    pub category: Category,
    /// Lifecycle status.
    pub status: PoolStatus,
    /// Display title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Coverage rule text.
    pub coverage_condition: String,
    /// Premium amount.
    pub premium: f64,
    /// Premium currency.
    pub premium_currency: String,
    /// Maximum payout amount.
    pub max_payout: f64,
    /// Payout currency.
    pub payout_currency: String,
    /// Member count.
    pub members: u32,
    /// Sum of contributions.
    pub pool_size: f64,
    /// Funding target.
    pub pool_target: f64,
    /// When the pool ends.
    pub end_date: DateTime<Utc>,
    /// Display icon.
    pub icon: Icon,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Pool> for PoolDto {
    fn from(p: &Pool) -> Self {
        Self {
            id: p.id().to_string(),
            event_id: p.event_id().to_string(),
            category: p.category(),
            status: p.status(),
            title: p.title().to_string(),
            description: p.description().to_string(),
            coverage_condition: p.coverage_condition().to_string(),
            premium: p.premium().amount,
            premium_currency: p.premium().currency.clone(),
            max_payout: p.max_payout().amount,
            payout_currency: p.max_payout().currency.clone(),
            members: p.members(),
            pool_size: p.pool_size(),
            pool_target: p.pool_target(),
            end_date: p.end_date(),
            icon: p.icon(),
            created_at: p.created_at(),
            updated_at: p.updated_at(),
        }
    }
}

/// Response for `GET /api/pools`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PoolsResponse {
    /// Matching pools.
    pub pools: Vec<PoolDto>,
    /// Number of matching pools.
    pub total: usize,
    /// Always 1.
    pub page: u32,
    /// Always 20.
    pub limit: u32,
}

impl PoolsResponse {
    /// Wraps `pools` in the fixed list envelope.
    #[must_use]
    pub fn new(pools: Vec<PoolDto>) -> Self {
        Self {
            total: pools.len(),
            pools,
            page: LIST_PAGE,
            limit: LIST_LIMIT,
        }
    }
}
