//! Home statistics DTO.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::HomeStats;
use crate::domain::stats::{CLAIM_RATE_UNIT, PAYOUT_TIME_UNIT};

/// Response for `GET /api/stats/home`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeStatsDto {
    /// Total value locked.
    pub tvl: f64,
    /// Currency of `tvl`.
    pub tvl_currency: String,
    /// Members across all pools.
    pub total_policies: u64,
    /// Confirmed payouts per claim.
    pub claim_rate: f64,
    /// Always `"percent"`.
    pub claim_rate_unit: String,
    /// Mean time from claim to payout.
    pub average_payout_time: i64,
    /// Always `"seconds"`.
    pub payout_time_unit: String,
}

impl From<HomeStats> for HomeStatsDto {
    fn from(s: HomeStats) -> Self {
        Self {
            tvl: s.tvl,
            tvl_currency: s.tvl_currency,
            total_policies: s.total_policies,
            claim_rate: s.claim_rate,
            claim_rate_unit: CLAIM_RATE_UNIT.to_string(),
            average_payout_time: s.average_payout_time,
            payout_time_unit: PAYOUT_TIME_UNIT.to_string(),
        }
    }
}
